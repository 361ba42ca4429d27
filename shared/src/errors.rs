//! Error types for the FitTrack domain

use thiserror::Error;

/// Domain errors raised by the parser, the estimator and input validation.
///
/// These never carry I/O failures; the backend wraps them into its own
/// API error together with storage and auth errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Workout text does not match the unit grammar. `unit` is 1-indexed.
    #[error("Workout {unit} is malformed: {reason}")]
    MalformedInput { unit: usize, reason: String },

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Invalid goal: {0}")]
    InvalidGoal(String),
}

impl DomainError {
    pub fn malformed(unit: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            unit,
            reason: reason.into(),
        }
    }

    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::InvalidMeasurement(msg.into())
    }

    pub fn goal(msg: impl Into<String>) -> Self {
        Self::InvalidGoal(msg.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
