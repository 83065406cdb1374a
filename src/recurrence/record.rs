//! Flat, serialisable pattern representation used at storage boundaries.

use super::{
    CompositeOffsets, CustomUnit, Interval, RecurrenceError, RecurrencePattern, RecurrenceResult,
    WeekOfMonth, weekday_from_index, weekday_index,
};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Pattern shape as persisted by the app: a `type` tag plus optional fields.
///
/// For `composite` records, `years` and `months` enable calendar offsets,
/// `yearDay` and `monthDay` are day offsets (summed), and `weekOfMonth` with
/// `weekDay` enables the Nth-weekday rule. `isLeapMonth` is accepted for
/// compatibility with lunar configuration screens; evaluation takes leap
/// months from the lunar calendar itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecord {
    /// Pattern type tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Positive interval.
    ///
    /// Required for every type, including `weekOfMonth` and `composite`,
    /// whose evaluation does not read it; zero is rejected as
    /// [`RecurrenceError::InvalidPattern`].
    pub value: u32,
    /// Unit for `custom` patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Weekday, `0` = Sunday .. `6` = Saturday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_day: Option<u8>,
    /// Day of month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_day: Option<u32>,
    /// Day of year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_day: Option<u32>,
    /// Month, `1..=12`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Week of month, `1..=5` where `5` means the last week.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_of_month: Option<u8>,
    /// Lunar leap-month marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_leap_month: Option<bool>,
    /// Composite year offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<u32>,
    /// Composite month offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<u32>,
}

impl PatternRecord {
    /// Creates a record with a type tag and interval and no optional fields.
    #[must_use]
    pub fn new(kind: impl Into<String>, value: u32) -> Self {
        Self {
            kind: kind.into(),
            value,
            ..Self::default()
        }
    }
}

fn invalid(reason: impl Into<String>) -> RecurrenceError {
    RecurrenceError::InvalidPattern(reason.into())
}

fn parse_weekday(index: u8) -> RecurrenceResult<Weekday> {
    weekday_from_index(index).ok_or_else(|| invalid(format!("weekday {index} is outside 0..=6")))
}

fn parse_week(index: u8) -> RecurrenceResult<WeekOfMonth> {
    WeekOfMonth::from_index(index)
        .ok_or_else(|| invalid(format!("week of month {index} is outside 1..=5")))
}

fn required<T>(field: Option<T>, name: &str) -> RecurrenceResult<T> {
    field.ok_or_else(|| invalid(format!("weekOfMonth pattern requires '{name}'")))
}

fn composite_offsets(record: &PatternRecord) -> RecurrenceResult<CompositeOffsets> {
    let mut offsets = CompositeOffsets::new();
    if let Some(years) = record.years {
        offsets = offsets.with_years(years);
    }
    if let Some(months) = record.months {
        offsets = offsets.with_months(months);
    }
    let days = match (record.year_day, record.month_day) {
        (None, None) => None,
        (year_day, month_day) => Some(
            year_day
                .unwrap_or(0)
                .checked_add(month_day.unwrap_or(0))
                .ok_or_else(|| invalid("composite day offset overflows"))?,
        ),
    };
    if let Some(total) = days {
        offsets = offsets.with_days(total);
    }
    if let (Some(week), Some(week_day)) = (record.week_of_month, record.week_day) {
        offsets = offsets.with_nth_weekday(parse_week(week)?, parse_weekday(week_day)?);
    }
    Ok(offsets)
}

impl TryFrom<PatternRecord> for RecurrencePattern {
    type Error = RecurrenceError;

    fn try_from(record: PatternRecord) -> Result<Self, Self::Error> {
        let every = Interval::new(record.value)?;
        let pattern = match record.kind.as_str() {
            "daily" => Self::Daily { every },
            "weekly" => Self::Weekly {
                every,
                week_day: record.week_day.map(parse_weekday).transpose()?,
            },
            "monthly" => Self::Monthly {
                every,
                month_day: record.month_day,
            },
            "yearly" => Self::Yearly { every },
            "weekOfMonth" => Self::WeekOfMonth {
                month: required(record.month, "month")?,
                week: parse_week(required(record.week_of_month, "weekOfMonth")?)?,
                week_day: parse_weekday(required(record.week_day, "weekDay")?)?,
            },
            "custom" => {
                let unit = record
                    .unit
                    .as_deref()
                    .ok_or_else(|| invalid("custom pattern requires 'unit'"))?;
                Self::Custom {
                    every,
                    unit: CustomUnit::try_from(unit)?,
                }
            }
            "composite" => Self::Composite(composite_offsets(&record)?),
            other => {
                return Err(RecurrenceError::UnsupportedRecurrence(format!(
                    "pattern type '{other}'"
                )));
            }
        };
        pattern.validate()?;
        Ok(pattern)
    }
}

impl From<&RecurrencePattern> for PatternRecord {
    fn from(pattern: &RecurrencePattern) -> Self {
        let mut record = Self::new(pattern.kind(), 1);
        match *pattern {
            RecurrencePattern::Daily { every } | RecurrencePattern::Yearly { every } => {
                record.value = every.get();
            }
            RecurrencePattern::Weekly { every, week_day } => {
                record.value = every.get();
                record.week_day = week_day.map(weekday_index);
            }
            RecurrencePattern::Monthly { every, month_day } => {
                record.value = every.get();
                record.month_day = month_day;
            }
            RecurrencePattern::WeekOfMonth {
                month,
                week,
                week_day,
            } => {
                record.month = Some(month);
                record.week_of_month = Some(week.index());
                record.week_day = Some(weekday_index(week_day));
            }
            RecurrencePattern::Custom { every, unit } => {
                record.value = every.get();
                record.unit = Some(unit.as_str().to_owned());
            }
            RecurrencePattern::Composite(offsets) => {
                record.years = offsets.years();
                record.months = offsets.months();
                record.month_day = offsets.days();
                record.week_of_month = offsets.week_of_month().map(WeekOfMonth::index);
                record.week_day = offsets.week_day().map(weekday_index);
            }
        }
        record
    }
}

impl From<RecurrencePattern> for PatternRecord {
    fn from(pattern: RecurrencePattern) -> Self {
        Self::from(&pattern)
    }
}
