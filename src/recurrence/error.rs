//! Error types for recurrence pattern validation and evaluation.

use crate::lunar::LunarError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for recurrence evaluation.
pub type RecurrenceResult<T> = Result<T, RecurrenceError>;

/// Errors returned while validating or evaluating recurrence patterns.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The pattern violates its declared invariants.
    #[error("invalid recurrence pattern: {0}")]
    InvalidPattern(String),

    /// The pattern type or unit is not implemented.
    #[error("unsupported recurrence: {0}")]
    UnsupportedRecurrence(String),

    /// A date string could not be parsed.
    #[error("invalid date input '{0}'")]
    InvalidDate(String),

    /// Date arithmetic overflowed or failed to move forward from the anchor.
    #[error("date arithmetic from {0} left the representable range")]
    DateOutOfRange(DateTime<Utc>),

    /// Lunar conversion failed.
    #[error(transparent)]
    Lunar(#[from] LunarError),
}

/// Error returned while parsing date types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown date type: {0}")]
pub struct ParseDateTypeError(pub String);
