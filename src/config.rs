use crate::error::{config_error, env_error, PlannerResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

/// Default location of the optional config file
pub const DEFAULT_CONFIG_PATH: &str = "config/slot_planner.toml";

/// Default service duration in minutes
pub const DEFAULT_SERVICE_DURATION: i64 = 30;

/// Default break duration in minutes
pub const DEFAULT_BREAK_DURATION: i64 = 10;

/// Default hourly rate
pub const DEFAULT_HOURLY_RATE: i64 = 1500;

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Locale for user-facing messages
    pub locale: String,
    /// Service duration used when none is given
    pub service_duration: i64,
    /// Break duration used when none is given
    pub break_duration: i64,
    /// Hourly rate used when none is given, 0 disables earnings
    pub hourly_rate: i64,
    /// Leave earnings out of reports
    pub hide_earnings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            service_duration: DEFAULT_SERVICE_DURATION,
            break_duration: DEFAULT_BREAK_DURATION,
            hourly_rate: DEFAULT_HOURLY_RATE,
            hide_earnings: false,
        }
    }
}

/// Values a config file may override, all optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    locale: Option<String>,
    service_duration: Option<i64>,
    break_duration: Option<i64>,
    hourly_rate: Option<i64>,
    hide_earnings: Option<bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> PlannerResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_env()?;

        let path = env::var("SLOT_PLANNER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        config.merge_file(Path::new(&path))?;

        Ok(config)
    }

    /// Build a config from `SLOT_PLANNER_*` environment variables
    pub fn from_env() -> PlannerResult<Self> {
        let defaults = Self::default();

        Ok(Config {
            locale: env::var("SLOT_PLANNER_LOCALE").unwrap_or(defaults.locale),
            service_duration: env_or("SLOT_PLANNER_SERVICE_DURATION", defaults.service_duration)?,
            break_duration: env_or("SLOT_PLANNER_BREAK_DURATION", defaults.break_duration)?,
            hourly_rate: env_or("SLOT_PLANNER_HOURLY_RATE", defaults.hourly_rate)?,
            hide_earnings: env_or("SLOT_PLANNER_HIDE_EARNINGS", defaults.hide_earnings)?,
        })
    }

    /// Override values with those found in a TOML file.
    ///
    /// A missing file leaves the config untouched.
    pub fn merge_file(&mut self, path: &Path) -> PlannerResult<()> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        self.merge_toml(&content)
    }

    /// Override values with those in a TOML document
    pub fn merge_toml(&mut self, content: &str) -> PlannerResult<()> {
        let file: FileConfig = toml::from_str(content)?;

        if let Some(locale) = file.locale {
            if locale.trim().is_empty() {
                return Err(config_error("locale must not be empty"));
            }
            self.locale = locale;
        }
        if let Some(service_duration) = file.service_duration {
            self.service_duration = service_duration;
        }
        if let Some(break_duration) = file.break_duration {
            self.break_duration = break_duration;
        }
        if let Some(hourly_rate) = file.hourly_rate {
            self.hourly_rate = hourly_rate;
        }
        if let Some(hide_earnings) = file.hide_earnings {
            self.hide_earnings = hide_earnings;
        }

        Ok(())
    }

    /// Hourly rate to pass on, `None` when earnings are disabled
    pub fn hourly_rate(&self) -> Option<i64> {
        (self.hourly_rate > 0).then_some(self.hourly_rate)
    }
}

fn env_or<T: FromStr>(var: &str, default: T) -> PlannerResult<T> {
    match env::var(var) {
        Ok(value) => value.trim().parse::<T>().map_err(|_| env_error(var, &value)),
        Err(_) => Ok(default),
    }
}
