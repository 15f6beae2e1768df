//! Time-slot partitioning and validation.
//!
//! A working window is split into back-to-back service slots separated by
//! breaks. [`validate_time_slots`] runs every check in order and either
//! returns the computed [`SlotPlan`] or the first [`Rejection`] hit.

pub mod board;
pub mod earnings;
pub mod models;
pub mod partition;
mod validator;

pub use board::{Assignee, SlotBoard};
pub use earnings::calculate_earnings;
pub use models::{
    Earnings, Rejection, Slot, SlotPlan, SlotRequest, SlotSpec, ValidationResult, Window,
};
pub use validator::{validate_time_slots, validate_time_slots_for};
