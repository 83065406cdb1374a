//! Repository port for cycle persistence and lookup.

use crate::cycle::domain::{CycleId, TaskCycle, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for cycle repository operations.
pub type TaskCycleRepositoryResult<T> = Result<T, TaskCycleRepositoryError>;

/// Cycle persistence contract.
#[async_trait]
pub trait TaskCycleRepository: Send + Sync {
    /// Persists a cycle and returns the stored copy.
    ///
    /// A cycle without an identifier is inserted and receives one; a cycle
    /// with an identifier replaces the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCycleRepositoryError::NotFound`] when the cycle carries
    /// an identifier the store does not know.
    async fn save(&self, cycle: &TaskCycle) -> TaskCycleRepositoryResult<TaskCycle>;

    /// Returns every cycle of a task, oldest first by creation instant.
    async fn find_by_task_id(&self, task_id: TaskId) -> TaskCycleRepositoryResult<Vec<TaskCycle>>;
}

/// Errors returned by cycle repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskCycleRepositoryError {
    /// The cycle was not found.
    #[error("cycle not found: {0}")]
    NotFound(CycleId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskCycleRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
