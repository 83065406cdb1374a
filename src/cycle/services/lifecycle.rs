//! Service layer for cycle creation, completion, and overdue remediation.

use super::{CollaboratorFailure, CycleLifecycleError, CycleLifecycleResult, LifecycleConfig};
use crate::cycle::{
    domain::{CycleResolution, NotificationId, OverdueAction, Task, TaskCycle, TaskId},
    ports::{NotificationScheduler, TaskCycleRepository},
};
use crate::recurrence::{calculate_due_date, calculate_due_date_or_fallback};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Result of [`CycleLifecycleService::complete_cycle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// The completed cycle as persisted.
    pub completed: TaskCycle,
    /// The auto-restarted cycle, when the task restarts automatically.
    pub next: Option<TaskCycle>,
}

/// Result of [`CycleLifecycleService::handle_overdue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdueOutcome {
    /// The overdue cycle as closed and persisted.
    pub closed: TaskCycle,
    /// The replacement cycle as persisted.
    pub next: TaskCycle,
}

/// Cycle lifecycle orchestration service.
///
/// Every new cycle is computed before anything is written, so a calculation
/// failure leaves storage untouched. Collaborator failures after the first
/// write are reported as-is; earlier writes are not rolled back.
#[derive(Clone)]
pub struct CycleLifecycleService<R, N, C>
where
    R: TaskCycleRepository,
    N: NotificationScheduler,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    scheduler: Arc<N>,
    clock: Arc<C>,
    config: LifecycleConfig,
}

impl<R, N, C> CycleLifecycleService<R, N, C>
where
    R: TaskCycleRepository,
    N: NotificationScheduler,
    C: Clock + Send + Sync,
{
    /// Creates a lifecycle service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, scheduler: Arc<N>, clock: Arc<C>) -> Self {
        Self::with_config(repository, scheduler, clock, LifecycleConfig::default())
    }

    /// Creates a lifecycle service with an explicit configuration.
    #[must_use]
    pub const fn with_config(
        repository: Arc<R>,
        scheduler: Arc<N>,
        clock: Arc<C>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            repository,
            scheduler,
            clock,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Creates, persists, and schedules the first cycle of a task.
    ///
    /// The cycle starts at `start`, or now when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleLifecycleError::InactiveTask`] for inactive tasks,
    /// calculation errors unchanged, and collaborator failures as
    /// [`CycleLifecycleError::Collaborator`].
    pub async fn start_first_cycle(
        &self,
        task: &Task,
        start: Option<DateTime<Utc>>,
    ) -> CycleLifecycleResult<TaskCycle> {
        ensure_active(task)?;
        let cycle = self.build_cycle(task, start.unwrap_or_else(|| self.clock.utc()))?;
        let saved = self.persist_and_notify(task, &cycle).await?;
        info!(
            task_id = %task.id(),
            cycle_id = ?saved.id(),
            due_date = %saved.due_date(),
            "started first cycle"
        );
        Ok(saved)
    }

    /// Computes the cycle that would follow a completion, without saving it.
    ///
    /// The cycle starts at `completion_date`, or now when `None`, and uses the
    /// task's calendar system.
    ///
    /// # Errors
    ///
    /// Returns calculation errors unchanged.
    pub fn get_next_cycle(
        &self,
        task: &Task,
        completion_date: Option<DateTime<Utc>>,
    ) -> CycleLifecycleResult<TaskCycle> {
        self.build_cycle(task, completion_date.unwrap_or_else(|| self.clock.utc()))
    }

    /// Previews the next due date for a task without failing.
    ///
    /// Falls back to the configured interval when the pattern cannot be
    /// evaluated. Lifecycle operations never use this path.
    #[must_use]
    pub fn preview_due_date(&self, task: &Task, start: Option<DateTime<Utc>>) -> DateTime<Utc> {
        calculate_due_date_or_fallback(
            start.unwrap_or_else(|| self.clock.utc()),
            task.recurrence_pattern(),
            task.date_type(),
            &self.config.evaluator,
        )
    }

    /// Completes a cycle and, for active auto-restarting tasks, starts the
    /// next one at the completion instant.
    ///
    /// Without auto-restart exactly one save happens and `next` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleLifecycleError::CycleTaskMismatch`] when the cycle
    /// belongs to another task, [`CycleLifecycleError::Domain`] when it is
    /// already completed, calculation errors unchanged, and collaborator
    /// failures as [`CycleLifecycleError::Collaborator`].
    pub async fn complete_cycle(
        &self,
        task: &Task,
        cycle: TaskCycle,
    ) -> CycleLifecycleResult<CompletionOutcome> {
        ensure_owned(task, &cycle)?;
        let mut completed = cycle;
        completed.mark_completed(&*self.clock)?;

        let pending_next = if task.auto_restart() && task.is_active() {
            Some(self.build_cycle(task, self.clock.utc())?)
        } else {
            None
        };

        let saved = self.persist(&completed).await?;
        let next = match pending_next {
            Some(next_cycle) => Some(self.persist_and_notify(task, &next_cycle).await?),
            None => None,
        };
        info!(
            task_id = %task.id(),
            cycle_id = ?saved.id(),
            next_cycle_id = ?next.as_ref().and_then(TaskCycle::id),
            "completed cycle"
        );
        Ok(CompletionOutcome {
            completed: saved,
            next,
        })
    }

    /// Applies an overdue remediation policy.
    ///
    /// - [`OverdueAction::Reset`] flags the cycle overdue, closes it as
    ///   [`CycleResolution::Reset`], and starts a new cycle now.
    /// - [`OverdueAction::Continue`] flags the cycle overdue, closes it as
    ///   [`CycleResolution::Continued`], and starts a new cycle at the old due
    ///   date. One period only: the new cycle may already be past due.
    /// - [`OverdueAction::Skip`] records the cycle as skipped and starts a new
    ///   cycle now, regardless of auto-restart.
    ///
    /// The old cycle is always closed, so remediating it again fails.
    ///
    /// # Errors
    ///
    /// Returns [`CycleLifecycleError::InactiveTask`] for inactive tasks,
    /// [`CycleLifecycleError::CycleTaskMismatch`] when the cycle belongs to
    /// another task, [`CycleLifecycleError::Domain`] when it is already
    /// completed, calculation errors unchanged, and collaborator failures as
    /// [`CycleLifecycleError::Collaborator`].
    pub async fn handle_overdue(
        &self,
        task: &Task,
        cycle: TaskCycle,
        action: OverdueAction,
    ) -> CycleLifecycleResult<OverdueOutcome> {
        ensure_active(task)?;
        ensure_owned(task, &cycle)?;

        let now = self.clock.utc();
        let mut closed = cycle;
        let next_start = match action {
            OverdueAction::Reset => {
                closed.mark_superseded(CycleResolution::Reset, &*self.clock)?;
                now
            }
            OverdueAction::Continue => {
                closed.mark_superseded(CycleResolution::Continued, &*self.clock)?;
                closed.due_date()
            }
            OverdueAction::Skip => {
                closed.mark_skipped(&*self.clock)?;
                now
            }
        };
        let next_cycle = self.build_cycle(task, next_start)?;

        let saved_closed = self.persist(&closed).await?;
        let saved_next = self.persist_and_notify(task, &next_cycle).await?;
        info!(
            task_id = %task.id(),
            action = %action,
            cycle_id = ?saved_closed.id(),
            next_cycle_id = ?saved_next.id(),
            next_due_date = %saved_next.due_date(),
            "remediated overdue cycle"
        );
        Ok(OverdueOutcome {
            closed: saved_closed,
            next: saved_next,
        })
    }

    /// Flags and persists a cycle whose due date has passed.
    ///
    /// Completed cycles and cycles already flagged are returned unchanged
    /// without a save.
    ///
    /// # Errors
    ///
    /// Returns collaborator failures as [`CycleLifecycleError::Collaborator`].
    pub async fn refresh_overdue(&self, cycle: TaskCycle) -> CycleLifecycleResult<TaskCycle> {
        if cycle.is_completed() || cycle.is_overdue() || self.clock.utc() <= cycle.due_date() {
            return Ok(cycle);
        }
        let mut flagged = cycle;
        flagged.mark_overdue()?;
        let saved = self.persist(&flagged).await?;
        debug!(
            task_id = %saved.task_id(),
            cycle_id = ?saved.id(),
            due_date = %saved.due_date(),
            "flagged cycle overdue"
        );
        Ok(saved)
    }

    /// Returns the most recently created uncompleted cycle of a task.
    ///
    /// # Errors
    ///
    /// Returns collaborator failures as [`CycleLifecycleError::Collaborator`].
    pub async fn current_cycle(&self, task_id: TaskId) -> CycleLifecycleResult<Option<TaskCycle>> {
        let cycles = self.cycle_history(task_id).await?;
        Ok(cycles.into_iter().rev().find(|cycle| !cycle.is_completed()))
    }

    /// Returns every cycle of a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns collaborator failures as [`CycleLifecycleError::Collaborator`].
    pub async fn cycle_history(&self, task_id: TaskId) -> CycleLifecycleResult<Vec<TaskCycle>> {
        self.repository
            .find_by_task_id(task_id)
            .await
            .map_err(|err| {
                error!(task_id = %task_id, error = %err, "failed to load cycles");
                CycleLifecycleError::Collaborator(CollaboratorFailure::Storage(err))
            })
    }

    fn build_cycle(&self, task: &Task, start: DateTime<Utc>) -> CycleLifecycleResult<TaskCycle> {
        let due = calculate_due_date(start, task.recurrence_pattern(), task.date_type())?;
        Ok(TaskCycle::new(
            task.id(),
            start,
            due,
            task.date_type(),
            &*self.clock,
        )?)
    }

    async fn persist(&self, cycle: &TaskCycle) -> CycleLifecycleResult<TaskCycle> {
        self.repository.save(cycle).await.map_err(|err| {
            error!(
                task_id = %cycle.task_id(),
                cycle_id = ?cycle.id(),
                error = %err,
                "failed to persist cycle"
            );
            CycleLifecycleError::Collaborator(CollaboratorFailure::Storage(err))
        })
    }

    async fn notify(
        &self,
        task: &Task,
        cycle: &TaskCycle,
    ) -> CycleLifecycleResult<Option<NotificationId>> {
        if !self.config.schedule_notifications {
            return Ok(None);
        }
        match self.scheduler.schedule_task_notification(task, cycle).await {
            Ok(Some(notification_id)) => {
                debug!(
                    task_id = %task.id(),
                    cycle_id = ?cycle.id(),
                    notification_id = %notification_id,
                    "scheduled cycle notification"
                );
                Ok(Some(notification_id))
            }
            Ok(None) => {
                debug!(task_id = %task.id(), cycle_id = ?cycle.id(), "notification not scheduled");
                Ok(None)
            }
            Err(err) => {
                error!(
                    task_id = %task.id(),
                    cycle_id = ?cycle.id(),
                    error = %err,
                    "failed to schedule cycle notification"
                );
                Err(CycleLifecycleError::Collaborator(
                    CollaboratorFailure::Notification(err),
                ))
            }
        }
    }

    async fn persist_and_notify(
        &self,
        task: &Task,
        cycle: &TaskCycle,
    ) -> CycleLifecycleResult<TaskCycle> {
        let saved = self.persist(cycle).await?;
        self.notify(task, &saved).await?;
        Ok(saved)
    }
}

const fn ensure_active(task: &Task) -> CycleLifecycleResult<()> {
    if task.is_active() {
        Ok(())
    } else {
        Err(CycleLifecycleError::InactiveTask(task.id()))
    }
}

fn ensure_owned(task: &Task, cycle: &TaskCycle) -> CycleLifecycleResult<()> {
    if cycle.task_id() == task.id() {
        Ok(())
    } else {
        Err(CycleLifecycleError::CycleTaskMismatch {
            task: task.id(),
            cycle_task: cycle.task_id(),
        })
    }
}
