//! Task cycle entity and its derived state.

use super::{CycleDomainError, CycleId, TaskId};
use crate::recurrence::DateType;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Derived state of a cycle at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    /// Not yet due.
    Pending,
    /// Due date passed without completion.
    Overdue,
    /// Completed or skipped; terminal.
    Completed,
}

/// How a completed cycle was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleResolution {
    /// Finished normally.
    Completed,
    /// Skipped through overdue remediation.
    Skipped,
    /// Flagged overdue and replaced by a cycle starting at remediation time.
    Reset,
    /// Flagged overdue and replaced by a cycle starting at its due date.
    Continued,
}

impl CycleResolution {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Skipped => "skipped",
            Self::Reset => "reset",
            Self::Continued => "continued",
        }
    }
}

/// One occurrence of a recurring task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCycle {
    id: Option<CycleId>,
    task_id: TaskId,
    start_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
    date_type: DateType,
    is_completed: bool,
    is_overdue: bool,
    completed_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    resolution: Option<CycleResolution>,
}

/// Parameter object for reconstructing a persisted cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCycleData {
    /// Persisted cycle identifier.
    pub id: CycleId,
    /// Owning task.
    pub task_id: TaskId,
    /// Persisted start instant.
    pub start_date: DateTime<Utc>,
    /// Persisted due instant.
    pub due_date: DateTime<Utc>,
    /// Calendar system inherited from the task.
    pub date_type: DateType,
    /// Persisted completion flag.
    pub is_completed: bool,
    /// Persisted overdue flag.
    pub is_overdue: bool,
    /// Persisted completion instant.
    pub completed_date: Option<DateTime<Utc>>,
    /// Persisted creation instant.
    pub created_at: DateTime<Utc>,
    /// Persisted resolution.
    pub resolution: Option<CycleResolution>,
}

impl TaskCycle {
    /// Creates an unsaved pending cycle.
    ///
    /// # Errors
    ///
    /// Returns [`CycleDomainError::InvalidWindow`] unless
    /// `start_date < due_date`.
    pub fn new(
        task_id: TaskId,
        start_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
        date_type: DateType,
        clock: &impl Clock,
    ) -> Result<Self, CycleDomainError> {
        if start_date >= due_date {
            return Err(CycleDomainError::InvalidWindow {
                start_date,
                due_date,
            });
        }
        Ok(Self {
            id: None,
            task_id,
            start_date,
            due_date,
            date_type,
            is_completed: false,
            is_overdue: false,
            completed_date: None,
            created_at: clock.utc(),
            resolution: None,
        })
    }

    /// Reconstructs a cycle from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedCycleData) -> Self {
        Self {
            id: Some(data.id),
            task_id: data.task_id,
            start_date: data.start_date,
            due_date: data.due_date,
            date_type: data.date_type,
            is_completed: data.is_completed,
            is_overdue: data.is_overdue,
            completed_date: data.completed_date,
            created_at: data.created_at,
            resolution: data.resolution,
        }
    }

    /// Returns the cycle with a storage-assigned identifier.
    #[must_use]
    pub const fn with_id(mut self, id: CycleId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the storage identifier, `None` until saved.
    #[must_use]
    pub const fn id(&self) -> Option<CycleId> {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the start instant.
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// Returns the due instant.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the calendar system the cycle was computed in.
    #[must_use]
    pub const fn date_type(&self) -> DateType {
        self.date_type
    }

    /// Returns whether the cycle is completed or skipped.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the persisted overdue flag.
    #[must_use]
    pub const fn is_overdue(&self) -> bool {
        self.is_overdue
    }

    /// Returns the completion instant, if completed.
    #[must_use]
    pub const fn completed_date(&self) -> Option<DateTime<Utc>> {
        self.completed_date
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns how the cycle was closed, if completed.
    #[must_use]
    pub const fn resolution(&self) -> Option<CycleResolution> {
        self.resolution
    }

    /// Derives the cycle state at `now`.
    ///
    /// A cycle counts as overdue once its flag is set or `now` is past the due
    /// instant, whichever comes first.
    #[must_use]
    pub fn state(&self, now: DateTime<Utc>) -> CycleState {
        if self.is_completed {
            CycleState::Completed
        } else if self.is_overdue || now > self.due_date {
            CycleState::Overdue
        } else {
            CycleState::Pending
        }
    }

    /// Marks the cycle as completed normally.
    ///
    /// # Errors
    ///
    /// Returns [`CycleDomainError::AlreadyCompleted`] if the cycle is closed.
    pub fn mark_completed(&mut self, clock: &impl Clock) -> Result<(), CycleDomainError> {
        self.close(CycleResolution::Completed, clock)
    }

    /// Marks the cycle as skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CycleDomainError::AlreadyCompleted`] if the cycle is closed.
    pub fn mark_skipped(&mut self, clock: &impl Clock) -> Result<(), CycleDomainError> {
        self.close(CycleResolution::Skipped, clock)
    }

    /// Flags the cycle overdue and closes it as replaced by a successor.
    ///
    /// `resolution` records which remediation replaced it.
    ///
    /// # Errors
    ///
    /// Returns [`CycleDomainError::AlreadyCompleted`] if the cycle is closed.
    pub fn mark_superseded(
        &mut self,
        resolution: CycleResolution,
        clock: &impl Clock,
    ) -> Result<(), CycleDomainError> {
        self.mark_overdue()?;
        self.close(resolution, clock)
    }

    /// Sets the overdue flag.
    ///
    /// # Errors
    ///
    /// Returns [`CycleDomainError::AlreadyCompleted`] if the cycle is closed.
    pub const fn mark_overdue(&mut self) -> Result<(), CycleDomainError> {
        if self.is_completed {
            return Err(CycleDomainError::AlreadyCompleted(self.task_id));
        }
        self.is_overdue = true;
        Ok(())
    }

    fn close(
        &mut self,
        resolution: CycleResolution,
        clock: &impl Clock,
    ) -> Result<(), CycleDomainError> {
        if self.is_completed {
            return Err(CycleDomainError::AlreadyCompleted(self.task_id));
        }
        self.is_completed = true;
        self.completed_date = Some(clock.utc());
        self.resolution = Some(resolution);
        Ok(())
    }
}
