// Export components
pub mod time_slots;

// Re-export the slot engine entry points
pub use time_slots::{validate_time_slots, validate_time_slots_for, ValidationResult};
