//! Date arithmetic in lunar months and years.

use super::{
    LunarError, LunarResult,
    convert::{lunar_month_days, lunar_to_solar, solar_to_lunar},
};
use chrono::{DateTime, Months, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Unit for [`add_lunar_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunarUnit {
    /// Solar days; identical in both calendars.
    Day,
    /// Lunar months.
    Month,
    /// Lunar years.
    Year,
}

/// Adds `amount` days, months, or years to `date`, counting months and years
/// in the lunar calendar.
///
/// Never fails. Month arithmetic lands on a regular (non-leap) month and
/// clamps the day to that month's length; year arithmetic keeps the month,
/// day, and leap flag. When the lunar conversion is impossible (out of range,
/// or the target year lacks the leap month or day) the same amount is added
/// in the solar calendar instead. If even that overflows, `date` is returned
/// unchanged. Time of day is preserved.
#[must_use]
pub fn add_lunar_time(date: DateTime<Utc>, amount: i32, unit: LunarUnit) -> DateTime<Utc> {
    let lunar = match unit {
        LunarUnit::Day => return add_solar_days(date, i64::from(amount)).unwrap_or(date),
        LunarUnit::Month => try_add_lunar_months(date, amount, None),
        LunarUnit::Year => try_add_lunar_years(date, amount),
    };
    lunar.unwrap_or_else(|err| {
        debug!(%date, amount, ?unit, error = %err, "lunar arithmetic failed, using solar calendar");
        let months = match unit {
            LunarUnit::Year => i64::from(amount) * 12,
            LunarUnit::Day | LunarUnit::Month => i64::from(amount),
        };
        add_solar_months(date, months).unwrap_or(date)
    })
}

/// Adds lunar months, optionally pinning the result to a lunar day of month.
///
/// `anchor_day` replaces the current lunar day before clamping to the target
/// month's length.
///
/// # Errors
///
/// Returns [`LunarError`] when `date` or the target month is outside the
/// supported range.
pub fn try_add_lunar_months(
    date: DateTime<Utc>,
    amount: i32,
    anchor_day: Option<u32>,
) -> LunarResult<DateTime<Utc>> {
    let lunar = solar_to_lunar(date.date_naive())?;
    let invalid = || LunarError::invalid_date(lunar.year(), lunar.month(), lunar.day(), false);

    let month_index = i64::from(lunar.year()) * 12 + i64::from(lunar.month()) - 1 + i64::from(amount);
    let year = i32::try_from(month_index.div_euclid(12)).map_err(|_| invalid())?;
    let month = u32::try_from(month_index.rem_euclid(12) + 1).map_err(|_| invalid())?;

    let days = lunar_month_days(year, month, false)?;
    let day = anchor_day.unwrap_or_else(|| lunar.day()).clamp(1, days);
    let solar = lunar_to_solar(year, month, day, false)?;
    Ok(at_time_of(solar, date))
}

/// Adds lunar years, keeping month, day, and leap flag.
///
/// # Errors
///
/// Returns [`LunarError`] when the target year lacks the same leap month or
/// day, or lies outside the supported range.
pub fn try_add_lunar_years(date: DateTime<Utc>, amount: i32) -> LunarResult<DateTime<Utc>> {
    let lunar = solar_to_lunar(date.date_naive())?;
    let year = lunar.year().checked_add(amount).ok_or_else(|| {
        LunarError::invalid_date(lunar.year(), lunar.month(), lunar.day(), lunar.is_leap())
    })?;
    let solar = lunar_to_solar(year, lunar.month(), lunar.day(), lunar.is_leap())?;
    Ok(at_time_of(solar, date))
}

/// Places `date` at the UTC time of day carried by `template`.
pub(crate) fn at_time_of(date: NaiveDate, template: DateTime<Utc>) -> DateTime<Utc> {
    date.and_time(template.time()).and_utc()
}

/// Adds signed solar days, `None` on overflow.
pub(crate) fn add_solar_days(date: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    date.checked_add_signed(TimeDelta::try_days(days)?)
}

/// Adds signed solar calendar months, clamping to month end; `None` on
/// overflow.
pub(crate) fn add_solar_months(date: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}
