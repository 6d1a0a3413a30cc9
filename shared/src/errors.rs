//! Error types shared by the HealthStride crates

use thiserror::Error;

/// A form field rejected before submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Parse failures for wire enums and timestamps typed in by a user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown gender: {0}")]
    Gender(String),

    #[error("Unknown activity level: {0}")]
    ActivityLevel(String),

    #[error("Invalid date-time (expected YYYY-MM-DDTHH:MM[:SS]): {0}")]
    DateTime(String),

    #[error("Unknown unit system: {0}")]
    UnitSystem(String),
}
