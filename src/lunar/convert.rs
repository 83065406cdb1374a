//! Bidirectional solar/lunar date conversion.

use super::{
    LunarError, LunarResult, Zodiac,
    table::{
        self, EPOCH_DAYS_FROM_CE, FIRST_LUNAR_YEAR, LAST_DAYS_FROM_CE, LAST_LUNAR_YEAR,
    },
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A day in the Chinese lunar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    year: i32,
    month: u32,
    day: u32,
    is_leap: bool,
    zodiac: Zodiac,
}

impl LunarDate {
    /// Creates a validated lunar date.
    ///
    /// # Errors
    ///
    /// Returns [`LunarError::InvalidLunarDate`] when the year is outside
    /// 1900-2100, the month or day is out of range for that year, or
    /// `is_leap` is set for a month that is not the year's leap month.
    pub fn new(year: i32, month: u32, day: u32, is_leap: bool) -> LunarResult<Self> {
        let days = lunar_month_days(year, month, is_leap)
            .map_err(|_| LunarError::invalid_date(year, month, day, is_leap))?;
        if day == 0 || day > days {
            return Err(LunarError::invalid_date(year, month, day, is_leap));
        }
        Ok(Self::from_parts(year, month, day, is_leap))
    }

    const fn from_parts(year: i32, month: u32, day: u32, is_leap: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap,
            zodiac: Zodiac::for_year(year),
        }
    }

    /// Returns the lunar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the lunar month, 1-based.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns the lunar day of month, 1-based.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Returns whether the date falls in an intercalary month.
    #[must_use]
    pub const fn is_leap(&self) -> bool {
        self.is_leap
    }

    /// Returns the zodiac animal of the lunar year.
    #[must_use]
    pub const fn zodiac(&self) -> Zodiac {
        self.zodiac
    }

    /// Converts back to the Gregorian calendar.
    ///
    /// # Errors
    ///
    /// Returns [`LunarError::InvalidLunarDate`] if the components were
    /// deserialized into an impossible combination.
    pub fn to_solar(&self) -> LunarResult<NaiveDate> {
        lunar_to_solar(self.year, self.month, self.day, self.is_leap)
    }
}

fn info_for(year: i32) -> Option<u32> {
    if (FIRST_LUNAR_YEAR..=LAST_LUNAR_YEAR).contains(&year) {
        table::year_info(year)
    } else {
        None
    }
}

/// Returns the month followed by an intercalary month in `year`, or `0`.
#[must_use]
pub fn leap_month(year: i32) -> u32 {
    info_for(year).map_or(0, table::leap_month_index)
}

/// Returns the length of the intercalary month in `year`, or `0`.
#[must_use]
pub fn leap_month_days(year: i32) -> u32 {
    info_for(year).map_or(0, table::leap_days)
}

/// Returns the number of days in lunar `year`, or `0` outside 1900-2100.
#[must_use]
pub fn lunar_year_days(year: i32) -> u32 {
    info_for(year).map_or(0, table::year_days)
}

/// Returns the length (29 or 30) of a lunar month.
///
/// # Errors
///
/// Returns [`LunarError::InvalidLunarDate`] when the year is unsupported,
/// the month is outside `1..=12`, or `is_leap` names a month that is not the
/// year's leap month.
pub fn lunar_month_days(year: i32, month: u32, is_leap: bool) -> LunarResult<u32> {
    let invalid = || LunarError::invalid_date(year, month, 1, is_leap);
    let info = info_for(year).ok_or_else(invalid)?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    if is_leap {
        if table::leap_month_index(info) != month {
            return Err(invalid());
        }
        return Ok(table::leap_days(info));
    }
    Ok(table::regular_month_days(info, month))
}

/// Converts a Gregorian date to its lunar date.
///
/// # Errors
///
/// Returns [`LunarError::OutOfRange`] for dates before 1900-01-31 or after
/// 2101-01-28.
pub fn solar_to_lunar(date: NaiveDate) -> LunarResult<LunarDate> {
    let day_number = date.num_days_from_ce();
    if !(EPOCH_DAYS_FROM_CE..=LAST_DAYS_FROM_CE).contains(&day_number) {
        return Err(LunarError::OutOfRange(date));
    }
    let mut offset =
        u32::try_from(day_number - EPOCH_DAYS_FROM_CE).map_err(|_| LunarError::OutOfRange(date))?;

    let mut year = FIRST_LUNAR_YEAR;
    let mut info = table::year_info(year).ok_or(LunarError::OutOfRange(date))?;
    while offset >= table::year_days(info) {
        offset -= table::year_days(info);
        year += 1;
        info = table::year_info(year).ok_or(LunarError::OutOfRange(date))?;
    }

    let leap = table::leap_month_index(info);
    for month in 1..=12 {
        let days = table::regular_month_days(info, month);
        if offset < days {
            return Ok(LunarDate::from_parts(year, month, offset + 1, false));
        }
        offset -= days;

        if month == leap {
            let days_in_leap = table::leap_days(info);
            if offset < days_in_leap {
                return Ok(LunarDate::from_parts(year, month, offset + 1, true));
            }
            offset -= days_in_leap;
        }
    }

    Err(LunarError::OutOfRange(date))
}

/// Converts a lunar date to the Gregorian calendar.
///
/// # Errors
///
/// Returns [`LunarError::InvalidLunarDate`] when `year` is outside
/// 1900-2100, `month` is outside `1..=12`, `day` exceeds the month's length,
/// or `is_leap` is set but the year's leap month differs.
pub fn lunar_to_solar(year: i32, month: u32, day: u32, is_leap: bool) -> LunarResult<NaiveDate> {
    let invalid = || LunarError::invalid_date(year, month, day, is_leap);
    let days_in_month = lunar_month_days(year, month, is_leap).map_err(|_| invalid())?;
    if day == 0 || day > days_in_month {
        return Err(invalid());
    }

    let mut offset: i32 = 0;
    for earlier_year in FIRST_LUNAR_YEAR..year {
        offset += i32::try_from(lunar_year_days(earlier_year)).map_err(|_| invalid())?;
    }

    let info = info_for(year).ok_or_else(invalid)?;
    let leap = table::leap_month_index(info);
    let mut days_before: u32 = 0;
    for earlier_month in 1..month {
        days_before += table::regular_month_days(info, earlier_month);
        if earlier_month == leap {
            days_before += table::leap_days(info);
        }
    }
    if is_leap {
        days_before += table::regular_month_days(info, month);
    }
    days_before += day - 1;
    offset += i32::try_from(days_before).map_err(|_| invalid())?;

    NaiveDate::from_num_days_from_ce_opt(EPOCH_DAYS_FROM_CE + offset).ok_or_else(invalid)
}
