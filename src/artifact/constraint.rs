//! Declared field constraints.
//!
//! A [`ConstraintViolation`] is surfaced as an ERROR diagnostic during
//! workspace-driven validation, but raised immediately as a failure by
//! checked programmatic constructors.

use smol_str::SmolStr;
use thiserror::Error;

/// One unmet declared field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("constraint violated on '{field}': {message}")]
pub struct ConstraintViolation {
    pub field: SmolStr,
    pub message: String,
}

impl ConstraintViolation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: SmolStr::new(field),
            message: message.into(),
        }
    }

    /// The common case: a required field is missing or blank.
    pub fn required(field: &str) -> Self {
        Self::new(field, "required value is missing")
    }
}
