//! Lunar date text: formatting, parsing, and the date-picker helpers.

use super::{
    LunarDate, LunarError, LunarResult, Zodiac,
    convert::{lunar_month_days, solar_to_lunar},
    labels::{
        self, CHINESE_DIGITS, NEW_YEARS_EVE, lunar_day_name, lunar_festival, lunar_month_name,
        stem_branch,
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything a date picker shows for one solar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarInfo {
    /// Solar date the information describes.
    pub solar: NaiveDate,
    /// Lunar date for `solar`.
    pub lunar: LunarDate,
    /// Stem-branch name of the lunar year, e.g. `甲辰`.
    pub year_name: String,
    /// Zodiac animal of the lunar year.
    pub zodiac: Zodiac,
    /// Month display name, e.g. `闰二月`.
    pub month_name: String,
    /// Day display name, e.g. `初五`.
    pub day_name: String,
    /// Traditional festival on this day, if any.
    pub festival: Option<String>,
    /// Approximate solar term on this day, if any.
    pub solar_term: Option<String>,
    /// Full formatted lunar date, as produced by [`format_lunar_date`].
    pub formatted: String,
}

/// Formats a lunar date as Chinese text, e.g. `二〇二三年闰二月初一`.
#[must_use]
pub fn format_lunar_date(date: &LunarDate) -> String {
    let year: String = date
        .year()
        .to_string()
        .chars()
        .map(|ch| {
            ch.to_digit(10)
                .and_then(|value| usize::try_from(value).ok())
                .and_then(|index| CHINESE_DIGITS.get(index))
                .copied()
                .unwrap_or_default()
        })
        .collect();
    let month = lunar_month_name(date.month(), date.is_leap()).unwrap_or_default();
    let day = lunar_day_name(date.day()).unwrap_or_default();
    format!("{year}年{month}{day}")
}

/// Parses lunar date text.
///
/// Accepts the Chinese form produced by [`format_lunar_date`] (`〇` or `零`
/// for zero, `冬`/`十一` and `腊`/`十二` for the last two months) and the
/// ASCII form `2024-02-05`, with `闰` before the month for leap months
/// (`2023-闰02-01`).
///
/// # Errors
///
/// Returns [`LunarError::InvalidLunarText`] when the text matches neither
/// form and [`LunarError::InvalidLunarDate`] when it names an impossible day.
pub fn parse_lunar_date(text: &str) -> LunarResult<LunarDate> {
    let trimmed = text.trim();
    let invalid = || LunarError::InvalidLunarText(text.to_owned());
    let (year, month, day, is_leap) = parse_ascii(trimmed)
        .or_else(|| parse_chinese(trimmed))
        .ok_or_else(invalid)?;
    LunarDate::new(year, month, day, is_leap)
}

fn parse_ascii(text: &str) -> Option<(i32, u32, u32, bool)> {
    let mut parts = text.split('-');
    let year = parts.next()?.parse().ok()?;
    let month_part = parts.next()?;
    let day = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let (month_digits, is_leap) = month_part
        .strip_prefix('闰')
        .map_or((month_part, false), |rest| (rest, true));
    let month = month_digits.parse().ok()?;
    Some((year, month, day, is_leap))
}

fn parse_chinese(text: &str) -> Option<(i32, u32, u32, bool)> {
    let (year_part, rest) = text.split_once('年')?;
    let year = parse_chinese_year(year_part)?;
    let (month_part, day_part) = rest.split_once('月')?;
    let (month_name, is_leap) = month_part
        .strip_prefix('闰')
        .map_or((month_part, false), |name| (name, true));
    let month = parse_month_name(month_name)?;
    let day = parse_day_name(day_part)?;
    Some((year, month, day, is_leap))
}

fn chinese_digit(ch: char) -> Option<u32> {
    let value = match ch {
        '〇' | '零' => 0,
        '一' => 1,
        '二' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        _ => return None,
    };
    Some(value)
}

fn parse_chinese_year(text: &str) -> Option<i32> {
    if text.is_empty() {
        return None;
    }
    text.chars().try_fold(0_i32, |year, ch| {
        let digit = i32::try_from(chinese_digit(ch)?).ok()?;
        year.checked_mul(10)?.checked_add(digit)
    })
}

fn parse_month_name(text: &str) -> Option<u32> {
    match text {
        "正" | "一" => Some(1),
        "冬" | "十一" => Some(11),
        "腊" | "十二" => Some(12),
        "十" => Some(10),
        _ => {
            let mut chars = text.chars();
            let value = chinese_digit(chars.next()?)?;
            if chars.next().is_some() || value < 2 {
                return None;
            }
            Some(value)
        }
    }
}

fn parse_day_name(text: &str) -> Option<u32> {
    match text {
        "初十" => return Some(10),
        "二十" => return Some(20),
        "三十" => return Some(30),
        _ => {}
    }
    let mut chars = text.chars();
    let base = match chars.next()? {
        '初' => 0,
        '十' => 10,
        '廿' => 20,
        _ => return None,
    };
    let unit = chinese_digit(chars.next()?)?;
    if chars.next().is_some() || unit == 0 {
        return None;
    }
    Some(base + unit)
}

/// Parses a solar date from an RFC 3339 instant or a plain `YYYY-MM-DD` date.
fn parse_solar_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|instant| instant.with_timezone(&Utc).date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok())
}

/// Collects the lunar labels for a solar date.
///
/// # Errors
///
/// Returns [`LunarError::OutOfRange`] when `date` is outside the supported
/// range.
pub fn full_lunar_info(date: NaiveDate) -> LunarResult<LunarInfo> {
    let lunar = solar_to_lunar(date)?;
    let festival = if lunar.is_leap() {
        None
    } else if lunar.month() == 12
        && lunar_month_days(lunar.year(), 12, false).is_ok_and(|days| days == lunar.day())
    {
        Some(NEW_YEARS_EVE)
    } else {
        lunar_festival(lunar.month(), lunar.day())
    };

    Ok(LunarInfo {
        solar: date,
        lunar,
        year_name: stem_branch(lunar.year()),
        zodiac: lunar.zodiac(),
        month_name: lunar_month_name(lunar.month(), lunar.is_leap()).unwrap_or_default(),
        day_name: lunar_day_name(lunar.day()).unwrap_or_default(),
        festival: festival.map(str::to_owned),
        solar_term: labels::solar_term(date).map(str::to_owned),
        formatted: format_lunar_date(&lunar),
    })
}

fn today_as_lunar(clock: &impl Clock) -> String {
    let today = clock.utc().date_naive();
    solar_to_lunar(today).map_or_else(|_| today.to_string(), |lunar| format_lunar_date(&lunar))
}

/// Converts solar date text to formatted lunar text for display.
///
/// Never fails: unparseable or out-of-range input falls back to today's
/// lunar date.
#[must_use]
pub fn convert_to_lunar(solar_text: &str, clock: &impl Clock) -> String {
    let Some(date) = parse_solar_date(solar_text) else {
        debug!(input = solar_text, "unparseable solar date, falling back to today");
        return today_as_lunar(clock);
    };
    match solar_to_lunar(date) {
        Ok(lunar) => format_lunar_date(&lunar),
        Err(err) => {
            debug!(input = solar_text, error = %err, "solar date has no lunar form, falling back to today");
            today_as_lunar(clock)
        }
    }
}

/// Converts lunar date text to a `YYYY-MM-DD` solar date for display.
///
/// Never fails: invalid lunar text falls back to today's solar date.
#[must_use]
pub fn convert_to_solar(lunar_text: &str, clock: &impl Clock) -> String {
    match parse_lunar_date(lunar_text).and_then(|lunar| lunar.to_solar()) {
        Ok(date) => date.to_string(),
        Err(err) => {
            debug!(input = lunar_text, error = %err, "invalid lunar date, falling back to today");
            clock.utc().date_naive().to_string()
        }
    }
}
