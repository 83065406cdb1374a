//! Evaluator configuration.

use serde::{Deserialize, Serialize};

/// Default fallback interval used by the lenient preview path.
pub const DEFAULT_FALLBACK_INTERVAL_DAYS: u32 = 7;

/// Configuration for lenient due-date previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluatorConfig {
    /// Days added to the start date when a preview cannot be calculated.
    pub fallback_interval_days: u32,
}

impl EvaluatorConfig {
    /// Sets the fallback interval.
    #[must_use]
    pub const fn with_fallback_interval_days(mut self, days: u32) -> Self {
        self.fallback_interval_days = days;
        self
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            fallback_interval_days: DEFAULT_FALLBACK_INTERVAL_DAYS,
        }
    }
}
