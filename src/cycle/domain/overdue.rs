//! Remediation policies for overdue cycles.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What to do with a cycle whose due date passed without completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverdueAction {
    /// Close the cycle as overdue and start a fresh cycle now.
    Reset,
    /// Close the cycle as overdue and start the next cycle at its due date.
    ///
    /// Advances exactly one period; the new cycle may itself already be
    /// overdue.
    Continue,
    /// Record the cycle as skipped and start a fresh cycle now.
    Skip,
}

impl OverdueAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Continue => "continue",
            Self::Skip => "skip",
        }
    }
}

impl TryFrom<&str> for OverdueAction {
    type Error = ParseOverdueActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(Self::Reset),
            "continue" => Ok(Self::Continue),
            "skip" => Ok(Self::Skip),
            _ => Err(ParseOverdueActionError(value.to_owned())),
        }
    }
}

impl fmt::Display for OverdueAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing overdue actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown overdue action: {0}")]
pub struct ParseOverdueActionError(pub String);
