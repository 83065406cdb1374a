//! Scheduler port for cycle reminder notifications.

use crate::cycle::domain::{NotificationId, Task, TaskCycle, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification scheduling.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Reminder scheduling contract.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    /// Schedules a reminder for a cycle.
    ///
    /// Returns `None` when nothing was scheduled, for example because the
    /// reminder time has already passed.
    async fn schedule_task_notification(
        &self,
        task: &Task,
        cycle: &TaskCycle,
    ) -> NotificationResult<Option<NotificationId>>;
}

/// Errors returned by notification scheduler adapters.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// The platform refused the request, e.g. missing permission.
    #[error("notification for task {task_id} rejected: {reason}")]
    Rejected {
        /// Task the reminder was for.
        task_id: TaskId,
        /// Reason string.
        reason: String,
    },

    /// Generic scheduler failure.
    #[error("notification scheduler error: {0}")]
    Scheduler(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationError {
    /// Wraps a scheduler error.
    pub fn scheduler(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Scheduler(Arc::new(err))
    }
}
