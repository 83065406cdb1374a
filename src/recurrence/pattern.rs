//! Typed recurrence patterns and their scalar building blocks.

use super::{ParseDateTypeError, PatternRecord, RecurrenceError, RecurrenceResult};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Calendar in which a task's recurrence is configured.
///
/// Stored instants are always solar; the lunar system only changes how month
/// and year steps are counted and how date text is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateType {
    /// Gregorian calendar.
    #[default]
    Solar,
    /// Chinese lunar calendar.
    Lunar,
}

impl DateType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Lunar => "lunar",
        }
    }
}

impl TryFrom<&str> for DateType {
    type Error = ParseDateTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "solar" => Ok(Self::Solar),
            "lunar" => Ok(Self::Lunar),
            _ => Err(ParseDateTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positive repeat interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval(NonZeroU32);

impl Interval {
    /// Creates a validated interval.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPattern`] when `value` is zero.
    pub fn new(value: u32) -> RecurrenceResult<Self> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or_else(|| RecurrenceError::InvalidPattern("interval must be positive".to_owned()))
    }

    /// Returns the interval value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// Which occurrence of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekOfMonth {
    /// First occurrence.
    First,
    /// Second occurrence.
    Second,
    /// Third occurrence.
    Third,
    /// Fourth occurrence.
    Fourth,
    /// Last occurrence, counted back from the end of the month.
    Last,
}

impl WeekOfMonth {
    /// Maps the stored `1..=5` index to a week, `5` being [`Self::Last`].
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            4 => Some(Self::Fourth),
            5 => Some(Self::Last),
            _ => None,
        }
    }

    /// Returns the stored `1..=5` index.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
            Self::Last => 5,
        }
    }
}

/// Maps a stored weekday index (`0` = Sunday .. `6` = Saturday).
#[must_use]
pub const fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Returns the stored weekday index (`0` = Sunday .. `6` = Saturday).
#[must_use]
pub const fn weekday_index(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

/// Unit of a [`RecurrencePattern::Custom`] interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomUnit {
    /// Days.
    Days,
    /// Weeks of seven days.
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

impl CustomUnit {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        }
    }
}

impl TryFrom<&str> for CustomUnit {
    type Error = RecurrenceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "days" | "day" => Ok(Self::Days),
            "weeks" | "week" => Ok(Self::Weeks),
            "months" | "month" => Ok(Self::Months),
            "years" | "year" => Ok(Self::Years),
            _ => Err(RecurrenceError::UnsupportedRecurrence(format!(
                "custom unit '{value}'"
            ))),
        }
    }
}

/// Independently enabled offsets of a composite pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompositeOffsets {
    years: Option<u32>,
    months: Option<u32>,
    days: Option<u32>,
    week_of_month: Option<WeekOfMonth>,
    week_day: Option<Weekday>,
}

impl CompositeOffsets {
    /// Creates an empty offset set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            years: None,
            months: None,
            days: None,
            week_of_month: None,
            week_day: None,
        }
    }

    /// Enables a year offset.
    #[must_use]
    pub const fn with_years(mut self, years: u32) -> Self {
        self.years = Some(years);
        self
    }

    /// Enables a month offset.
    #[must_use]
    pub const fn with_months(mut self, months: u32) -> Self {
        self.months = Some(months);
        self
    }

    /// Enables a day offset.
    #[must_use]
    pub const fn with_days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    /// Enables the "Nth weekday of the month" rule.
    #[must_use]
    pub const fn with_nth_weekday(mut self, week: WeekOfMonth, week_day: Weekday) -> Self {
        self.week_of_month = Some(week);
        self.week_day = Some(week_day);
        self
    }

    /// Returns the year offset, if enabled.
    #[must_use]
    pub const fn years(&self) -> Option<u32> {
        self.years
    }

    /// Returns the month offset, if enabled.
    #[must_use]
    pub const fn months(&self) -> Option<u32> {
        self.months
    }

    /// Returns the day offset, if enabled.
    #[must_use]
    pub const fn days(&self) -> Option<u32> {
        self.days
    }

    /// Returns the week-of-month setting, if enabled.
    #[must_use]
    pub const fn week_of_month(&self) -> Option<WeekOfMonth> {
        self.week_of_month
    }

    /// Returns the weekday setting, if enabled.
    #[must_use]
    pub const fn week_day(&self) -> Option<Weekday> {
        self.week_day
    }

    /// Returns the Nth-weekday rule when both halves are enabled.
    #[must_use]
    pub const fn nth_weekday(&self) -> Option<(WeekOfMonth, Weekday)> {
        match (self.week_of_month, self.week_day) {
            (Some(week), Some(week_day)) => Some((week, week_day)),
            _ => None,
        }
    }

    /// Returns whether a year or month offset is enabled.
    #[must_use]
    pub const fn shifts_calendar(&self) -> bool {
        self.years.is_some() || self.months.is_some()
    }

    fn validate(&self) -> RecurrenceResult<()> {
        let offsets = [self.years, self.months, self.days];
        if offsets.contains(&Some(0)) {
            return Err(RecurrenceError::InvalidPattern(
                "composite offsets must be positive".to_owned(),
            ));
        }
        if !self.shifts_calendar() && self.days.is_none() && self.nth_weekday().is_none() {
            return Err(RecurrenceError::InvalidPattern(
                "composite pattern has no enabled offset".to_owned(),
            ));
        }
        Ok(())
    }
}

/// How a task repeats.
///
/// Serialises through [`PatternRecord`], the flat shape used at storage and
/// API boundaries, so deserialising validates the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PatternRecord", into = "PatternRecord")]
pub enum RecurrencePattern {
    /// Every `every` days.
    Daily {
        /// Interval in days.
        every: Interval,
    },
    /// Every `every` weeks, or on the next `week_day` when one is set.
    Weekly {
        /// Interval in weeks.
        every: Interval,
        /// Anchor weekday.
        week_day: Option<Weekday>,
    },
    /// Every `every` months, optionally on a fixed day of month.
    Monthly {
        /// Interval in months.
        every: Interval,
        /// Anchor day of month, clamped to the month's length.
        month_day: Option<u32>,
    },
    /// Every `every` years.
    Yearly {
        /// Interval in years.
        every: Interval,
    },
    /// The Nth weekday of a fixed month, once a year.
    WeekOfMonth {
        /// Month, `1..=12`.
        month: u32,
        /// Which occurrence within the month.
        week: WeekOfMonth,
        /// Weekday to land on.
        week_day: Weekday,
    },
    /// Every `every` units.
    Custom {
        /// Interval in `unit`.
        every: Interval,
        /// Interval unit.
        unit: CustomUnit,
    },
    /// Cumulative year, month, and day offsets, or an Nth-weekday rule.
    Composite(CompositeOffsets),
}

impl RecurrencePattern {
    /// Every `days` days.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPattern`] when `days` is zero.
    pub fn daily(days: u32) -> RecurrenceResult<Self> {
        Ok(Self::Daily {
            every: Interval::new(days)?,
        })
    }

    /// Every `weeks` weeks.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPattern`] when `weeks` is zero.
    pub fn weekly(weeks: u32) -> RecurrenceResult<Self> {
        Ok(Self::Weekly {
            every: Interval::new(weeks)?,
            week_day: None,
        })
    }

    /// On the next `week_day`.
    #[must_use]
    pub const fn weekly_on(week_day: Weekday) -> Self {
        Self::Weekly {
            every: Interval(NonZeroU32::MIN),
            week_day: Some(week_day),
        }
    }

    /// Every `months` months.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPattern`] when `months` is zero.
    pub fn monthly(months: u32) -> RecurrenceResult<Self> {
        Ok(Self::Monthly {
            every: Interval::new(months)?,
            month_day: None,
        })
    }

    /// On `month_day` every `months` months.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPattern`] when `months` is zero or
    /// `month_day` is outside `1..=31`.
    pub fn monthly_on_day(months: u32, month_day: u32) -> RecurrenceResult<Self> {
        let pattern = Self::Monthly {
            every: Interval::new(months)?,
            month_day: Some(month_day),
        };
        pattern.validate()?;
        Ok(pattern)
    }

    /// Every `years` years.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPattern`] when `years` is zero.
    pub fn yearly(years: u32) -> RecurrenceResult<Self> {
        Ok(Self::Yearly {
            every: Interval::new(years)?,
        })
    }

    /// On the `week`-th `week_day` of `month` each year.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPattern`] when `month` is outside
    /// `1..=12`.
    pub fn week_of_month(month: u32, week: WeekOfMonth, week_day: Weekday) -> RecurrenceResult<Self> {
        let pattern = Self::WeekOfMonth {
            month,
            week,
            week_day,
        };
        pattern.validate()?;
        Ok(pattern)
    }

    /// Every `value` `unit`s.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPattern`] when `value` is zero.
    pub fn custom(value: u32, unit: CustomUnit) -> RecurrenceResult<Self> {
        Ok(Self::Custom {
            every: Interval::new(value)?,
            unit,
        })
    }

    /// Cumulative offsets.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPattern`] when no offset is enabled
    /// or an enabled offset is zero.
    pub fn composite(offsets: CompositeOffsets) -> RecurrenceResult<Self> {
        offsets.validate()?;
        Ok(Self::Composite(offsets))
    }

    /// Returns the storage name of the pattern type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Daily { .. } => "daily",
            Self::Weekly { .. } => "weekly",
            Self::Monthly { .. } => "monthly",
            Self::Yearly { .. } => "yearly",
            Self::WeekOfMonth { .. } => "weekOfMonth",
            Self::Custom { .. } => "custom",
            Self::Composite(_) => "composite",
        }
    }

    /// Checks invariants that the variant fields alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPattern`] for an out-of-range month
    /// or day of month, or an empty composite.
    pub fn validate(&self) -> RecurrenceResult<()> {
        match self {
            Self::Monthly {
                month_day: Some(day),
                ..
            } if !(1..=31).contains(day) => Err(RecurrenceError::InvalidPattern(format!(
                "day of month {day} is outside 1..=31"
            ))),
            Self::WeekOfMonth { month, .. } if !(1..=12).contains(month) => Err(
                RecurrenceError::InvalidPattern(format!("month {month} is outside 1..=12")),
            ),
            Self::Composite(offsets) => offsets.validate(),
            _ => Ok(()),
        }
    }
}
