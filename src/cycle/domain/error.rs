//! Error types for cycle domain validation.

use super::TaskId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating cycles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CycleDomainError {
    /// The due instant does not come after the start instant.
    #[error("cycle window is empty: due {due_date} is not after start {start_date}")]
    InvalidWindow {
        /// Requested start instant.
        start_date: DateTime<Utc>,
        /// Requested due instant.
        due_date: DateTime<Utc>,
    },

    /// The cycle has already been completed or skipped.
    #[error("cycle for task {0} is already completed")]
    AlreadyCompleted(TaskId),
}
