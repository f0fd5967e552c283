//! Error types for the Workout Service

use thiserror::Error;

/// Message returned to callers for any malformed or incomplete request
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request";

/// Message returned to callers when a workout ends before it starts
pub const INVALID_RANGE_MESSAGE: &str = "End time must be greater than start time";

/// Input validation failures
///
/// These are caller errors and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("either name and password or a token must be provided")]
    MissingCredentials,

    #[error("invalid fields: {0}")]
    InvalidFields(String),

    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    #[error("end {end} is not after start {start}")]
    EndNotAfterStart { start: i64, end: i64 },
}

impl ValidationError {
    /// Message that is safe to show to the caller
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EndNotAfterStart { .. } => INVALID_RANGE_MESSAGE,
            _ => INVALID_REQUEST_MESSAGE,
        }
    }
}
