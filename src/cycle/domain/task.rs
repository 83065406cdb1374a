//! Task configuration consumed by the cycle lifecycle.

use super::{CycleId, TaskId};
use crate::recurrence::{DateType, RecurrencePattern};
use serde::{Deserialize, Serialize};

/// Recurring task as seen by the cycle lifecycle.
///
/// The lifecycle reads tasks but never mutates them; callers persist the
/// `current_cycle` reference themselves after a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    recurrence_pattern: RecurrencePattern,
    date_type: DateType,
    auto_restart: bool,
    is_active: bool,
    current_cycle: Option<CycleId>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted recurrence pattern.
    pub recurrence_pattern: RecurrencePattern,
    /// Persisted calendar system.
    pub date_type: DateType,
    /// Whether completing a cycle starts the next one.
    pub auto_restart: bool,
    /// Whether the task is active.
    pub is_active: bool,
    /// Persisted current cycle reference, if any.
    pub current_cycle: Option<CycleId>,
}

impl Task {
    /// Creates an active, auto-restarting solar task.
    #[must_use]
    pub fn new(title: impl Into<String>, recurrence_pattern: RecurrencePattern) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            recurrence_pattern,
            date_type: DateType::Solar,
            auto_restart: true,
            is_active: true,
            current_cycle: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            recurrence_pattern: data.recurrence_pattern,
            date_type: data.date_type,
            auto_restart: data.auto_restart,
            is_active: data.is_active,
            current_cycle: data.current_cycle,
        }
    }

    /// Sets the calendar system.
    #[must_use]
    pub const fn with_date_type(mut self, date_type: DateType) -> Self {
        self.date_type = date_type;
        self
    }

    /// Sets whether completing a cycle starts the next one.
    #[must_use]
    pub const fn with_auto_restart(mut self, auto_restart: bool) -> Self {
        self.auto_restart = auto_restart;
        self
    }

    /// Sets whether the task is active.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the current cycle reference.
    #[must_use]
    pub const fn with_current_cycle(mut self, cycle_id: CycleId) -> Self {
        self.current_cycle = Some(cycle_id);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the recurrence pattern.
    #[must_use]
    pub const fn recurrence_pattern(&self) -> &RecurrencePattern {
        &self.recurrence_pattern
    }

    /// Returns the calendar system.
    #[must_use]
    pub const fn date_type(&self) -> DateType {
        self.date_type
    }

    /// Returns whether completing a cycle starts the next one.
    #[must_use]
    pub const fn auto_restart(&self) -> bool {
        self.auto_restart
    }

    /// Returns whether the task is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the current cycle reference, if any.
    #[must_use]
    pub const fn current_cycle(&self) -> Option<CycleId> {
        self.current_cycle
    }
}
