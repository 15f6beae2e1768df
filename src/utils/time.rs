use crate::components::time_slots::Rejection;
use chrono::{NaiveTime, Timelike};
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one day
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse time string in HH:MM format
///
/// Both fields must be one or two ASCII digits.
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parse_field(parts[0])?;
    let minute = parse_field(parts[1])?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

fn parse_field(field: &str) -> Option<u32> {
    // u32::from_str accepts a leading '+', which is not a wall-clock digit
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse::<u32>().ok()
}

/// A wall-clock time with minute precision, stored as minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight, `00:00`
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Parse a `HH:MM` string
    pub fn parse(text: &str) -> Result<Self, Rejection> {
        let (hour, minute) = parse_time(text).ok_or_else(|| Rejection::MalformedTime {
            input: text.to_string(),
        })?;
        Ok(TimeOfDay((hour * 60 + minute) as u16))
    }

    /// Build from a minute-of-day count, `None` when outside `[0, 1439]`
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then(|| TimeOfDay(minutes as u16))
    }

    /// Minutes since midnight
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Add a (possibly negative) minute offset, wrapping around midnight
    pub fn add_minutes(self, delta: i64) -> Self {
        let wrapped = (i64::from(self.0) + delta).rem_euclid(i64::from(MINUTES_PER_DAY));
        TimeOfDay(wrapped as u16)
    }
}

/// Minutes from `start` to `end`.
///
/// An `end` earlier than `start` is read as the next day, so the result is
/// always in `[0, 1439]`. A window can never cover more than one day.
pub fn elapsed_minutes(start: TimeOfDay, end: TimeOfDay) -> u32 {
    let start = start.minutes();
    let mut end = end.minutes();

    // Window crosses midnight
    if end < start {
        end += MINUTES_PER_DAY;
    }

    end - start
}

/// Add minutes to a time, wrapping past midnight
pub fn add_minutes(time: TimeOfDay, delta: i64) -> TimeOfDay {
    time.add_minutes(delta)
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = Rejection;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeOfDay::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Seconds and fractions are dropped
    fn from(time: NaiveTime) -> Self {
        TimeOfDay((time.hour() * 60 + time.minute()) as u16)
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(time: TimeOfDay) -> Self {
        NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or_default()
    }
}

impl JsonSchema for TimeOfDay {
    fn schema_name() -> String {
        "TimeOfDay".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        let mut schema = String::json_schema(gen).into_object();
        schema.string().pattern = Some("^([01]?[0-9]|2[0-3]):[0-5]?[0-9]$".to_string());
        Schema::Object(schema)
    }
}
