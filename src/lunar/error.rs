//! Error types for lunar calendar conversion and parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for lunar calendar operations.
pub type LunarResult<T> = Result<T, LunarError>;

/// Errors returned by the lunar/solar converter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LunarError {
    /// The solar date falls outside the table-backed range.
    #[error("solar date {0} is outside the supported lunar range (1900-01-31..=2101-01-28)")]
    OutOfRange(NaiveDate),

    /// The lunar date components do not name a real lunar day.
    #[error("invalid lunar date {year}-{month}-{day} (leap month: {is_leap})")]
    InvalidLunarDate {
        /// Lunar year.
        year: i32,
        /// Lunar month, 1-based.
        month: u32,
        /// Lunar day of month, 1-based.
        day: u32,
        /// Whether the intercalary month was requested.
        is_leap: bool,
    },

    /// The text could not be parsed as a lunar date.
    #[error("unrecognised lunar date text '{0}'")]
    InvalidLunarText(String),
}

impl LunarError {
    pub(crate) const fn invalid_date(year: i32, month: u32, day: u32, is_leap: bool) -> Self {
        Self::InvalidLunarDate {
            year,
            month,
            day,
            is_leap,
        }
    }
}
