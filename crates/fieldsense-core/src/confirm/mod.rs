//! Confirm-password matching and filling

mod matcher;

pub use matcher::{fill_confirm_field, FillOutcome, MAX_CONFIRM_DISTANCE};
