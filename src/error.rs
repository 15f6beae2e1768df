use crate::components::time_slots::Rejection;
use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(slot_planner::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(slot_planner::config))]
    Config(String),

    #[error("Usage error: {0}")]
    #[diagnostic(
        code(slot_planner::usage),
        help("slot_planner <start> <end> [--service N] [--break N] [--rate N] [--max-participants N] [--locale L] [--json] | --schema")
    )]
    Usage(String),

    #[error("All {count} slots are already assigned")]
    #[diagnostic(code(slot_planner::board_full))]
    BoardFull { count: usize },

    #[error("Slot {slot} does not exist (valid range: 1-{count})")]
    #[diagnostic(code(slot_planner::slot_out_of_range))]
    SlotOutOfRange { slot: u32, count: usize },

    #[error("Slot {slot} is already assigned")]
    #[diagnostic(code(slot_planner::slot_taken))]
    SlotTaken { slot: u32 },

    #[error("Time slot request rejected: {0}")]
    #[diagnostic(code(slot_planner::rejected))]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    #[diagnostic(code(slot_planner::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(slot_planner::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(slot_planner::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type PlannerResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str, value: &str) -> Error {
    Error::Environment(format!("Invalid value for {}: {:?}", var, value))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create usage errors
pub fn usage_error(message: &str) -> Error {
    Error::Usage(message.to_string())
}
