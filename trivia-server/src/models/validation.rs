//! Validation error types

use thiserror::Error;

/// Validation error for request payloads and domain models
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is missing or blank
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field could not be read as the expected type
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Integer outside the accepted range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
}
