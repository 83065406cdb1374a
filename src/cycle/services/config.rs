//! Lifecycle service configuration.

use crate::recurrence::EvaluatorConfig;
use serde::{Deserialize, Serialize};

/// Configuration for [`CycleLifecycleService`](super::CycleLifecycleService).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LifecycleConfig {
    /// Whether new cycles are handed to the notification scheduler.
    pub schedule_notifications: bool,
    /// Settings for due-date previews.
    pub evaluator: EvaluatorConfig,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            schedule_notifications: true,
            evaluator: EvaluatorConfig::default(),
        }
    }
}

impl LifecycleConfig {
    /// Creates a configuration that never schedules notifications.
    ///
    /// Useful for imports and background maintenance where reminders would
    /// be noise.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            schedule_notifications: false,
            ..Self::default()
        }
    }

    /// Sets whether new cycles are handed to the notification scheduler.
    #[must_use]
    pub const fn with_schedule_notifications(mut self, enabled: bool) -> Self {
        self.schedule_notifications = enabled;
        self
    }

    /// Sets the evaluator configuration.
    #[must_use]
    pub const fn with_evaluator(mut self, evaluator: EvaluatorConfig) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Loads a configuration from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
