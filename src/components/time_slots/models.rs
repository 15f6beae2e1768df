use crate::utils::time::{elapsed_minutes, TimeOfDay};
use miette::Diagnostic;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller input for one slot computation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SlotRequest {
    /// Window start (HH:MM)
    #[serde(default)]
    pub start_time: Option<String>,
    /// Window end (HH:MM), earlier than the start means the next day
    #[serde(default)]
    pub end_time: Option<String>,
    /// Minutes a single appointment occupies
    pub service_duration: i64,
    /// Minutes of gap between consecutive appointments
    #[serde(default)]
    pub break_duration: i64,
    /// Hourly rate used for earnings, absent or non-positive disables them
    #[serde(default)]
    pub hourly_rate: Option<i64>,
    /// Upper bound on the number of slots, absent or non-positive means no cap
    #[serde(default)]
    pub max_participants: Option<i64>,
}

impl SlotRequest {
    /// Create a request without an hourly rate
    pub fn new(
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        service_duration: i64,
        break_duration: i64,
    ) -> Self {
        Self {
            start_time: Some(start_time.into()),
            end_time: Some(end_time.into()),
            service_duration,
            break_duration,
            hourly_rate: None,
            max_participants: None,
        }
    }

    /// Set the hourly rate
    pub fn with_hourly_rate(mut self, hourly_rate: i64) -> Self {
        self.hourly_rate = Some(hourly_rate);
        self
    }

    /// Cap the number of slots
    pub fn with_max_participants(mut self, max_participants: i64) -> Self {
        self.max_participants = Some(max_participants);
        self
    }

    /// The slot cap, `None` when absent or non-positive
    pub fn participant_cap(&self) -> Option<u64> {
        self.max_participants
            .filter(|max| *max > 0)
            .map(|max| max as u64)
    }
}

/// Service and break lengths for one booking, both in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub service_duration: u64,
    pub break_duration: u64,
}

impl SlotSpec {
    pub fn new(service_duration: u64, break_duration: u64) -> Self {
        Self {
            service_duration,
            break_duration,
        }
    }

    /// Length of one service plus the break that follows it
    pub fn period(&self) -> u64 {
        self.service_duration.saturating_add(self.break_duration)
    }
}

/// The booking's total availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Window {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Window {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Length of the window, wrapping past midnight when `end < start`
    pub fn total_minutes(&self) -> u64 {
        u64::from(elapsed_minutes(self.start, self.end))
    }
}

/// One computed appointment unit.
///
/// `assignee` belongs to the caller. Slot computation always leaves it empty
/// and never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Slot<P = ()> {
    /// 1-based position in the plan
    pub slot: u32,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Service duration in minutes
    pub duration: u64,
    #[serde(default)]
    pub is_filled: bool,
    // No `default` here, it would demand `P: Default`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<P>,
}

impl<P> Slot<P> {
    /// Whether someone holds this slot
    pub fn is_assigned(&self) -> bool {
        self.is_filled || self.assignee.is_some()
    }
}

/// Monetary value of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Earnings {
    /// Earnings over every slot
    pub total: u64,
    /// Earnings for a single slot
    pub per_slot: u64,
}

/// A successfully partitioned window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SlotPlan<P = ()> {
    /// Slots laid out, after any participant cap
    pub slot_count: u32,
    /// Slots the window could hold without a cap
    pub physical_slot_count: u32,
    /// Minutes taken by services and the breaks between them
    pub used_minutes: u64,
    /// Slack left at the end of the window
    pub remaining_minutes: u64,
    /// Length of the whole window
    pub available_minutes: u64,
    pub slots: Vec<Slot<P>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Earnings>,
}

impl<P> SlotPlan<P> {
    /// Total earnings, `None` when no positive hourly rate was given
    pub fn total_earnings(&self) -> Option<u64> {
        self.earnings.map(|earnings| earnings.total)
    }

    pub fn first_slot(&self) -> Option<&Slot<P>> {
        self.slots.first()
    }

    pub fn last_slot(&self) -> Option<&Slot<P>> {
        self.slots.last()
    }

    /// Whether a participant cap left room in the window unused
    pub fn is_capped(&self) -> bool {
        self.slot_count < self.physical_slot_count
    }
}

/// Why a request could not be turned into a slot plan
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("start and end time are required")]
    #[diagnostic(code(slot_planner::rejected::missing_input))]
    MissingInput,

    #[error("service duration must be at least one minute, got {service_duration}")]
    #[diagnostic(code(slot_planner::rejected::invalid_service_duration))]
    InvalidServiceDuration { service_duration: i64 },

    #[error("break duration must not be negative, got {break_duration}")]
    #[diagnostic(code(slot_planner::rejected::invalid_break_duration))]
    InvalidBreakDuration { break_duration: i64 },

    #[error("malformed time {input:?}, expected HH:MM")]
    #[diagnostic(code(slot_planner::rejected::malformed_time))]
    MalformedTime { input: String },

    #[error("end time must differ from start time")]
    #[diagnostic(code(slot_planner::rejected::inverted_or_empty_window))]
    InvertedOrEmptyWindow,

    #[error("service duration ({service_duration} min) exceeds the window ({total_minutes} min)")]
    #[diagnostic(code(slot_planner::rejected::service_duration_exceeds_window))]
    ServiceDurationExceedsWindow {
        service_duration: u64,
        total_minutes: u64,
    },

    #[error("service and break durations add up to zero")]
    #[diagnostic(code(slot_planner::rejected::zero_period_length))]
    ZeroPeriodLength,

    #[error("no slot fits (window: {total_minutes} min, service: {service_duration} min)")]
    #[diagnostic(code(slot_planner::rejected::no_slots_fit))]
    NoSlotsFit {
        total_minutes: u64,
        service_duration: u64,
    },

    #[error("{slot_count} slots need {used_minutes} min but only {total_minutes} min are available")]
    #[diagnostic(
        code(slot_planner::rejected::capacity_overflow),
        help("the slot count formula produced more slots than fit the window")
    )]
    CapacityOverflow {
        slot_count: u64,
        used_minutes: u64,
        total_minutes: u64,
        excess_minutes: u64,
    },
}

impl Rejection {
    /// Stable reason code, matching the serialized `reason` tag
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::MissingInput => "missing_input",
            Rejection::InvalidServiceDuration { .. } => "invalid_service_duration",
            Rejection::InvalidBreakDuration { .. } => "invalid_break_duration",
            Rejection::MalformedTime { .. } => "malformed_time",
            Rejection::InvertedOrEmptyWindow => "inverted_or_empty_window",
            Rejection::ServiceDurationExceedsWindow { .. } => "service_duration_exceeds_window",
            Rejection::ZeroPeriodLength => "zero_period_length",
            Rejection::NoSlotsFit { .. } => "no_slots_fit",
            Rejection::CapacityOverflow { .. } => "capacity_overflow",
        }
    }

    /// True when the rejection points at a defect in the slot arithmetic
    /// rather than at the caller's input
    pub fn is_internal(&self) -> bool {
        matches!(self, Rejection::CapacityOverflow { .. })
    }
}

/// Outcome of validating a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationResult<P = ()> {
    Valid(SlotPlan<P>),
    Invalid(Rejection),
}

impl<P> ValidationResult<P> {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn plan(&self) -> Option<&SlotPlan<P>> {
        match self {
            ValidationResult::Valid(plan) => Some(plan),
            ValidationResult::Invalid(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(rejection) => Some(rejection),
        }
    }

    /// Convert into a `Result` so `?` can be used on it
    pub fn into_result(self) -> Result<SlotPlan<P>, Rejection> {
        match self {
            ValidationResult::Valid(plan) => Ok(plan),
            ValidationResult::Invalid(rejection) => Err(rejection),
        }
    }
}

impl<P> From<Result<SlotPlan<P>, Rejection>> for ValidationResult<P> {
    fn from(result: Result<SlotPlan<P>, Rejection>) -> Self {
        match result {
            Ok(plan) => ValidationResult::Valid(plan),
            Err(rejection) => ValidationResult::Invalid(rejection),
        }
    }
}
