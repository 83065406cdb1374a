//! Service-level errors for cycle lifecycle operations.

use crate::cycle::{
    domain::{CycleDomainError, TaskId},
    ports::{NotificationError, TaskCycleRepositoryError},
};
use crate::recurrence::RecurrenceError;
use thiserror::Error;

/// A storage or notification collaborator rejected a call.
#[derive(Debug, Clone, Error)]
pub enum CollaboratorFailure {
    /// Cycle storage failed.
    #[error("cycle storage failed: {0}")]
    Storage(#[from] TaskCycleRepositoryError),
    /// Notification scheduling failed.
    #[error("notification scheduling failed: {0}")]
    Notification(#[from] NotificationError),
}

/// Errors returned by lifecycle service operations.
#[derive(Debug, Error)]
pub enum CycleLifecycleError {
    /// Due-date calculation failed.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CycleDomainError),
    /// A collaborator call failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorFailure),
    /// The task is not active.
    #[error("task {0} is inactive")]
    InactiveTask(TaskId),
    /// The cycle belongs to a different task.
    #[error("cycle belongs to task {cycle_task}, not {task}")]
    CycleTaskMismatch {
        /// Task passed to the operation.
        task: TaskId,
        /// Task that owns the cycle.
        cycle_task: TaskId,
    },
}

/// Result type for lifecycle service operations.
pub type CycleLifecycleResult<T> = Result<T, CycleLifecycleError>;
