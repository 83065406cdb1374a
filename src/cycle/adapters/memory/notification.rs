//! In-memory notification scheduler that records requests.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, RwLock};

use crate::cycle::{
    domain::{CycleId, NotificationId, Task, TaskCycle, TaskId},
    ports::{NotificationError, NotificationResult, NotificationScheduler},
};
use chrono::{DateTime, Utc};

/// A reminder accepted by [`InMemoryNotificationScheduler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledNotification {
    /// Scheduler-issued identifier.
    pub id: NotificationId,
    /// Task the reminder is for.
    pub task_id: TaskId,
    /// Cycle the reminder is for.
    pub cycle_id: Option<CycleId>,
    /// Instant the reminder fires.
    pub fire_at: DateTime<Utc>,
}

/// Scheduler that fires reminders at each cycle's due date.
///
/// Declines cycles whose due date is not in the future, as a platform
/// scheduler would.
#[derive(Debug)]
pub struct InMemoryNotificationScheduler<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    scheduled: Arc<RwLock<Vec<ScheduledNotification>>>,
}

impl<C> InMemoryNotificationScheduler<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a scheduler that reads "now" from `clock`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            scheduled: Arc::default(),
        }
    }

    /// Returns every reminder accepted so far, in scheduling order.
    ///
    /// # Errors
    ///
    /// Returns scheduler errors when lock acquisition fails.
    pub fn scheduled(&self) -> NotificationResult<Vec<ScheduledNotification>> {
        let scheduled = self
            .scheduled
            .read()
            .map_err(|err| NotificationError::scheduler(std::io::Error::other(err.to_string())))?;
        Ok(scheduled.clone())
    }
}

#[async_trait]
impl<C> NotificationScheduler for InMemoryNotificationScheduler<C>
where
    C: Clock + Send + Sync,
{
    async fn schedule_task_notification(
        &self,
        task: &Task,
        cycle: &TaskCycle,
    ) -> NotificationResult<Option<NotificationId>> {
        if cycle.due_date() <= self.clock.utc() {
            return Ok(None);
        }
        let mut scheduled = self
            .scheduled
            .write()
            .map_err(|err| NotificationError::scheduler(std::io::Error::other(err.to_string())))?;
        let id = NotificationId::new(format!(
            "{}-{}",
            task.id(),
            cycle.due_date().timestamp()
        ));
        scheduled.push(ScheduledNotification {
            id: id.clone(),
            task_id: task.id(),
            cycle_id: cycle.id(),
            fire_at: cycle.due_date(),
        });
        Ok(Some(id))
    }
}
