//! Start/due date evaluation for recurrence patterns.
//!
//! Nothing here reads the clock: identical inputs always give identical
//! outputs.

use super::{
    CompositeOffsets, CustomUnit, DateType, EvaluatorConfig, RecurrenceError, RecurrencePattern,
    RecurrenceResult, WeekOfMonth,
    calendar::{Step, nth_weekday_of_month, next_weekday_after, shift, shift_to_month_day},
};
use crate::lunar::{self, LunarError, add_solar_days, at_time_of};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, Utc, Weekday};
use tracing::warn;

const fn step_for(unit: CustomUnit) -> Step {
    match unit {
        CustomUnit::Days => Step::Days,
        CustomUnit::Weeks => Step::Weeks,
        CustomUnit::Months => Step::Months,
        CustomUnit::Years => Step::Years,
    }
}

/// Computes the due date of a cycle starting at `start`.
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidPattern`] when the pattern fails
/// validation and [`RecurrenceError::DateOutOfRange`] when the arithmetic
/// overflows or does not move past `start`.
pub fn calculate_due_date(
    start: DateTime<Utc>,
    pattern: &RecurrencePattern,
    date_type: DateType,
) -> RecurrenceResult<DateTime<Utc>> {
    pattern.validate()?;
    let due = match *pattern {
        RecurrencePattern::Daily { every } => {
            shift(start, i64::from(every.get()), Step::Days, date_type)?
        }
        RecurrencePattern::Weekly {
            week_day: Some(week_day),
            ..
        } => next_weekday_after(start, week_day)?,
        RecurrencePattern::Weekly {
            every,
            week_day: None,
        } => shift(start, i64::from(every.get()), Step::Weeks, date_type)?,
        RecurrencePattern::Monthly {
            every,
            month_day: Some(month_day),
        } => shift_to_month_day(start, i64::from(every.get()), month_day, date_type)?,
        RecurrencePattern::Monthly {
            every,
            month_day: None,
        } => shift(start, i64::from(every.get()), Step::Months, date_type)?,
        RecurrencePattern::Yearly { every } => {
            shift(start, i64::from(every.get()), Step::Years, date_type)?
        }
        RecurrencePattern::WeekOfMonth {
            month,
            week,
            week_day,
        } => next_week_of_month(start, month, week, week_day)?,
        RecurrencePattern::Custom { every, unit } => {
            shift(start, i64::from(every.get()), step_for(unit), date_type)?
        }
        RecurrencePattern::Composite(offsets) => apply_composite(start, &offsets, date_type)?,
    };

    if due <= start {
        return Err(RecurrenceError::DateOutOfRange(start));
    }
    Ok(due)
}

/// Computes an approximate start date for a cycle due at `due`.
///
/// Subtracts the interval [`calculate_due_date`] would add. This is a
/// single step back, not an exact inverse: `WeekOfMonth` steps back one
/// year, and composite Nth-weekday patterns step back one month plus any
/// year and month offsets.
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidPattern`] when the pattern fails
/// validation and [`RecurrenceError::DateOutOfRange`] when the arithmetic
/// overflows.
pub fn calculate_start_date(
    due: DateTime<Utc>,
    pattern: &RecurrencePattern,
    date_type: DateType,
) -> RecurrenceResult<DateTime<Utc>> {
    pattern.validate()?;
    match *pattern {
        RecurrencePattern::Daily { every } => {
            shift(due, -i64::from(every.get()), Step::Days, date_type)
        }
        RecurrencePattern::Weekly {
            week_day: Some(_), ..
        } => shift(due, -1, Step::Weeks, date_type),
        RecurrencePattern::Weekly {
            every,
            week_day: None,
        } => shift(due, -i64::from(every.get()), Step::Weeks, date_type),
        RecurrencePattern::Monthly {
            every,
            month_day: Some(month_day),
        } => shift_to_month_day(due, -i64::from(every.get()), month_day, date_type),
        RecurrencePattern::Monthly {
            every,
            month_day: None,
        } => shift(due, -i64::from(every.get()), Step::Months, date_type),
        RecurrencePattern::Yearly { every } => {
            shift(due, -i64::from(every.get()), Step::Years, date_type)
        }
        RecurrencePattern::WeekOfMonth { .. } => shift(due, -1, Step::Years, DateType::Solar),
        RecurrencePattern::Custom { every, unit } => {
            shift(due, -i64::from(every.get()), step_for(unit), date_type)
        }
        RecurrencePattern::Composite(offsets) => unapply_composite(due, &offsets, date_type),
    }
}

fn next_week_of_month(
    start: DateTime<Utc>,
    month: u32,
    week: WeekOfMonth,
    week_day: Weekday,
) -> RecurrenceResult<DateTime<Utc>> {
    for year in [start.year(), start.year() + 1] {
        let date = nth_weekday_of_month(year, month, week, week_day)
            .ok_or(RecurrenceError::DateOutOfRange(start))?;
        let candidate = at_time_of(date, start);
        if candidate > start {
            return Ok(candidate);
        }
    }
    Err(RecurrenceError::DateOutOfRange(start))
}

fn nth_weekday_in_month_of(
    anchor: DateTime<Utc>,
    week: WeekOfMonth,
    week_day: Weekday,
) -> RecurrenceResult<DateTime<Utc>> {
    nth_weekday_of_month(anchor.year(), anchor.month(), week, week_day)
        .map(|date| at_time_of(date, anchor))
        .ok_or(RecurrenceError::DateOutOfRange(anchor))
}

fn apply_composite(
    start: DateTime<Utc>,
    offsets: &CompositeOffsets,
    date_type: DateType,
) -> RecurrenceResult<DateTime<Utc>> {
    let mut cursor = start;
    if let Some(years) = offsets.years() {
        cursor = shift(cursor, i64::from(years), Step::Years, date_type)?;
    }
    if let Some(months) = offsets.months() {
        cursor = shift(cursor, i64::from(months), Step::Months, date_type)?;
    }

    let Some((week, week_day)) = offsets.nth_weekday() else {
        if let Some(days) = offsets.days() {
            cursor = shift(cursor, i64::from(days), Step::Days, date_type)?;
        }
        return Ok(cursor);
    };

    // Day offsets are ignored once the Nth-weekday rule is enabled.
    let anchor = if offsets.shifts_calendar() {
        cursor
    } else {
        shift(start, 1, Step::Months, DateType::Solar)?
    };
    let candidate = nth_weekday_in_month_of(anchor, week, week_day)?;
    if candidate > start {
        return Ok(candidate);
    }
    let following = shift(anchor, 1, Step::Months, DateType::Solar)?;
    nth_weekday_in_month_of(following, week, week_day)
}

fn unapply_composite(
    due: DateTime<Utc>,
    offsets: &CompositeOffsets,
    date_type: DateType,
) -> RecurrenceResult<DateTime<Utc>> {
    let mut cursor = due;
    match offsets.nth_weekday() {
        Some(_) if !offsets.shifts_calendar() => {
            return shift(due, -1, Step::Months, DateType::Solar);
        }
        Some(_) => {}
        None => {
            if let Some(days) = offsets.days() {
                cursor = shift(cursor, -i64::from(days), Step::Days, date_type)?;
            }
        }
    }
    if let Some(months) = offsets.months() {
        cursor = shift(cursor, -i64::from(months), Step::Months, date_type)?;
    }
    if let Some(years) = offsets.years() {
        cursor = shift(cursor, -i64::from(years), Step::Years, date_type)?;
    }
    Ok(cursor)
}

/// Due-date preview that never fails.
///
/// On any calculation error the failure is logged at `warn` and `start`
/// plus `config.fallback_interval_days` is returned. Use this only for
/// interactive previews; lifecycle operations call [`calculate_due_date`].
#[must_use]
pub fn calculate_due_date_or_fallback(
    start: DateTime<Utc>,
    pattern: &RecurrencePattern,
    date_type: DateType,
    config: &EvaluatorConfig,
) -> DateTime<Utc> {
    calculate_due_date(start, pattern, date_type).unwrap_or_else(|err| {
        warn!(
            %start,
            pattern = pattern.kind(),
            error = %err,
            fallback_days = config.fallback_interval_days,
            "due date calculation failed, using fallback interval"
        );
        add_solar_days(start, i64::from(config.fallback_interval_days)).unwrap_or(start)
    })
}

/// Parses a date boundary string.
///
/// Accepts RFC 3339 instants for either calendar. For [`DateType::Solar`]
/// plain `YYYY-MM-DD` dates are read at midnight UTC. For
/// [`DateType::Lunar`] anything else is read as lunar date text and
/// converted to its solar day at midnight UTC; it never falls back to a
/// solar reading.
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidDate`] when no form matches and
/// [`RecurrenceError::Lunar`] when lunar text names an impossible lunar day.
pub fn parse_date_input(text: &str, date_type: DateType) -> RecurrenceResult<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    let invalid = || RecurrenceError::InvalidDate(text.to_owned());
    let day = match date_type {
        DateType::Solar => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())?,
        DateType::Lunar => match lunar::parse_lunar_date(trimmed) {
            Ok(date) => date.to_solar()?,
            Err(LunarError::InvalidLunarText(_)) => return Err(invalid()),
            Err(err) => return Err(err.into()),
        },
    };
    Ok(day.and_time(NaiveTime::MIN).and_utc())
}

/// Formats an instant as an RFC 3339 UTC string with second precision.
#[must_use]
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// String form of [`calculate_due_date`].
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidDate`] for unparseable input, otherwise
/// the errors of [`calculate_due_date`].
pub fn calculate_due_date_str(
    start: &str,
    pattern: &RecurrencePattern,
    date_type: DateType,
) -> RecurrenceResult<String> {
    let anchor = parse_date_input(start, date_type)?;
    calculate_due_date(anchor, pattern, date_type).map(format_instant)
}

/// String form of [`calculate_start_date`].
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidDate`] for unparseable input, otherwise
/// the errors of [`calculate_start_date`].
pub fn calculate_start_date_str(
    due: &str,
    pattern: &RecurrencePattern,
    date_type: DateType,
) -> RecurrenceResult<String> {
    let anchor = parse_date_input(due, date_type)?;
    calculate_start_date(anchor, pattern, date_type).map(format_instant)
}
