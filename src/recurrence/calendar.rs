//! Solar calendar helpers shared by due-date and start-date evaluation.

use super::{DateType, RecurrenceError, RecurrenceResult, WeekOfMonth};
use crate::lunar::{
    self, FIRST_LUNAR_YEAR, LAST_LUNAR_YEAR, LunarError, add_solar_days, add_solar_months,
    at_time_of,
};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};
use tracing::debug;

/// Signed step unit used internally by both directions of evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Days,
    Weeks,
    Months,
    Years,
}

/// Moves `date` by `amount` steps, counting months and years in the task's
/// calendar.
pub(super) fn shift(
    date: DateTime<Utc>,
    amount: i64,
    step: Step,
    date_type: DateType,
) -> RecurrenceResult<DateTime<Utc>> {
    let out_of_range = || RecurrenceError::DateOutOfRange(date);
    match (step, date_type) {
        (Step::Days, _) => add_solar_days(date, amount).ok_or_else(out_of_range),
        (Step::Weeks, _) => {
            add_solar_days(date, amount.checked_mul(7).ok_or_else(out_of_range)?)
                .ok_or_else(out_of_range)
        }
        (Step::Months, DateType::Solar) => add_solar_months(date, amount).ok_or_else(out_of_range),
        (Step::Years, DateType::Solar) => {
            add_solar_months(date, amount.checked_mul(12).ok_or_else(out_of_range)?)
                .ok_or_else(out_of_range)
        }
        (Step::Months, DateType::Lunar) => {
            let months = i32::try_from(amount).map_err(|_| out_of_range())?;
            Ok(lunar::try_add_lunar_months(date, months, None)?)
        }
        (Step::Years, DateType::Lunar) => {
            let years = i32::try_from(amount).map_err(|_| out_of_range())?;
            shift_lunar_years(date, years)
        }
    }
}

/// Adds lunar years on the strict path.
///
/// Fails when `date` or the target year lies outside the lunar table. Inside
/// the table a day the target year lacks (its leap month, or day 30 of a
/// short month) is moved by the same number of solar years instead.
fn shift_lunar_years(date: DateTime<Utc>, years: i32) -> RecurrenceResult<DateTime<Utc>> {
    let origin = lunar::solar_to_lunar(date.date_naive())?;
    let target = origin
        .year()
        .checked_add(years)
        .ok_or(RecurrenceError::DateOutOfRange(date))?;
    if !(FIRST_LUNAR_YEAR..=LAST_LUNAR_YEAR).contains(&target) {
        let (month, day, is_leap) = (origin.month(), origin.day(), origin.is_leap());
        return Err(LunarError::invalid_date(target, month, day, is_leap).into());
    }
    lunar::try_add_lunar_years(date, years).or_else(|err| {
        debug!(%date, years, error = %err, "lunar day missing in target year, using solar years");
        add_solar_months(date, i64::from(years).saturating_mul(12))
            .ok_or(RecurrenceError::DateOutOfRange(date))
    })
}

/// Moves `date` by `months` and pins the day of month to `month_day`,
/// clamped to the target month's length.
pub(super) fn shift_to_month_day(
    date: DateTime<Utc>,
    months: i64,
    month_day: u32,
    date_type: DateType,
) -> RecurrenceResult<DateTime<Utc>> {
    if date_type == DateType::Lunar {
        let lunar_months = i32::try_from(months).map_err(|_| RecurrenceError::DateOutOfRange(date))?;
        return Ok(lunar::try_add_lunar_months(date, lunar_months, Some(month_day))?);
    }

    let out_of_range = || RecurrenceError::DateOutOfRange(date);
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).ok_or_else(out_of_range)?;
    let target_first = add_solar_months(at_time_of(first, date), months).ok_or_else(out_of_range)?;
    let last_day = days_in_month(target_first.year(), target_first.month()).ok_or_else(out_of_range)?;
    let target = NaiveDate::from_ymd_opt(
        target_first.year(),
        target_first.month(),
        month_day.clamp(1, last_day),
    )
    .ok_or_else(out_of_range)?;
    Ok(at_time_of(target, date))
}

/// Number of days in a solar month.
pub(super) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = first.checked_add_months(Months::new(1))?;
    Some(next_first.pred_opt()?.day())
}

/// The next `week_day` strictly after `date`.
pub(super) fn next_weekday_after(
    date: DateTime<Utc>,
    week_day: Weekday,
) -> RecurrenceResult<DateTime<Utc>> {
    let current = date.weekday().num_days_from_sunday();
    let target = week_day.num_days_from_sunday();
    let ahead = match (target + 7 - current).rem_euclid(7) {
        0 => 7,
        days => days,
    };
    add_solar_days(date, i64::from(ahead)).ok_or(RecurrenceError::DateOutOfRange(date))
}

/// The `week`-th `week_day` of a solar month.
pub(super) fn nth_weekday_of_month(
    year: i32,
    month: u32,
    week: WeekOfMonth,
    week_day: Weekday,
) -> Option<NaiveDate> {
    let nth = match week {
        WeekOfMonth::First => 1,
        WeekOfMonth::Second => 2,
        WeekOfMonth::Third => 3,
        WeekOfMonth::Fourth => 4,
        WeekOfMonth::Last => return last_weekday_of_month(year, month, week_day),
    };
    NaiveDate::from_weekday_of_month_opt(year, month, week_day, nth)
}

fn last_weekday_of_month(year: i32, month: u32, week_day: Weekday) -> Option<NaiveDate> {
    let next_first = NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_months(Months::new(1))?;
    let last = next_first.pred_opt()?;
    (0..7)
        .filter_map(|back| last.checked_sub_days(Days::new(back)))
        .find(|day| day.weekday() == week_day)
}
