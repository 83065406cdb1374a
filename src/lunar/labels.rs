//! Fixed label tables: zodiac animals, stem-branch names, month and day
//! names, festivals, and approximate solar terms.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const MONTH_NAMES: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "腊",
];

pub(super) const CHINESE_DIGITS: [&str; 10] =
    ["〇", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

const LUNAR_FESTIVALS: [(u32, u32, &str); 10] = [
    (1, 1, "春节"),
    (1, 15, "元宵节"),
    (2, 2, "龙抬头"),
    (5, 5, "端午节"),
    (7, 7, "七夕节"),
    (7, 15, "中元节"),
    (8, 15, "中秋节"),
    (9, 9, "重阳节"),
    (12, 8, "腊八节"),
    (12, 23, "小年"),
];

/// Name given to the last day of the twelfth lunar month.
pub(super) const NEW_YEARS_EVE: &str = "除夕";

// Fixed approximations; real solar terms drift by a day between years.
const SOLAR_TERMS: [(u32, u32, &str); 24] = [
    (1, 6, "小寒"),
    (1, 20, "大寒"),
    (2, 4, "立春"),
    (2, 19, "雨水"),
    (3, 6, "惊蛰"),
    (3, 21, "春分"),
    (4, 5, "清明"),
    (4, 20, "谷雨"),
    (5, 6, "立夏"),
    (5, 21, "小满"),
    (6, 6, "芒种"),
    (6, 21, "夏至"),
    (7, 7, "小暑"),
    (7, 23, "大暑"),
    (8, 8, "立秋"),
    (8, 23, "处暑"),
    (9, 8, "白露"),
    (9, 23, "秋分"),
    (10, 8, "寒露"),
    (10, 23, "霜降"),
    (11, 7, "立冬"),
    (11, 22, "小雪"),
    (12, 7, "大雪"),
    (12, 22, "冬至"),
];

/// The twelve zodiac animals, in cycle order starting from the rat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zodiac {
    /// 鼠
    Rat,
    /// 牛
    Ox,
    /// 虎
    Tiger,
    /// 兔
    Rabbit,
    /// 龙
    Dragon,
    /// 蛇
    Snake,
    /// 马
    Horse,
    /// 羊
    Goat,
    /// 猴
    Monkey,
    /// 鸡
    Rooster,
    /// 狗
    Dog,
    /// 猪
    Pig,
}

impl Zodiac {
    /// Returns the zodiac animal for a lunar year.
    #[must_use]
    pub const fn for_year(year: i32) -> Self {
        match (year - 4).rem_euclid(12) {
            0 => Self::Rat,
            1 => Self::Ox,
            2 => Self::Tiger,
            3 => Self::Rabbit,
            4 => Self::Dragon,
            5 => Self::Snake,
            6 => Self::Horse,
            7 => Self::Goat,
            8 => Self::Monkey,
            9 => Self::Rooster,
            10 => Self::Dog,
            _ => Self::Pig,
        }
    }

    /// Returns the single-character Chinese name.
    #[must_use]
    pub const fn as_chinese(self) -> &'static str {
        match self {
            Self::Rat => "鼠",
            Self::Ox => "牛",
            Self::Tiger => "虎",
            Self::Rabbit => "兔",
            Self::Dragon => "龙",
            Self::Snake => "蛇",
            Self::Horse => "马",
            Self::Goat => "羊",
            Self::Monkey => "猴",
            Self::Rooster => "鸡",
            Self::Dog => "狗",
            Self::Pig => "猪",
        }
    }
}

fn cycle_index(year: i32, len: i32) -> Option<usize> {
    usize::try_from((year - 4).rem_euclid(len)).ok()
}

/// Returns the sexagenary (stem-branch) name of a lunar year, e.g. `甲辰`.
#[must_use]
pub fn stem_branch(year: i32) -> String {
    let stem = cycle_index(year, 10).and_then(|index| HEAVENLY_STEMS.get(index));
    let branch = cycle_index(year, 12).and_then(|index| EARTHLY_BRANCHES.get(index));
    match (stem, branch) {
        (Some(stem), Some(branch)) => format!("{stem}{branch}"),
        _ => String::new(),
    }
}

/// Returns the display name of a lunar month, e.g. `正月` or `闰二月`.
///
/// Returns `None` when `month` is not in `1..=12`.
#[must_use]
pub fn lunar_month_name(month: u32, is_leap: bool) -> Option<String> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    let name = MONTH_NAMES.get(index)?;
    let prefix = if is_leap { "闰" } else { "" };
    Some(format!("{prefix}{name}月"))
}

fn digit(value: u32) -> &'static str {
    usize::try_from(value)
        .ok()
        .and_then(|index| CHINESE_DIGITS.get(index))
        .copied()
        .unwrap_or_default()
}

/// Returns the display name of a lunar day, e.g. `初一`, `十五`, `廿九`.
///
/// Returns `None` when `day` is not in `1..=30`.
#[must_use]
pub fn lunar_day_name(day: u32) -> Option<String> {
    let name = match day {
        10 => "初十".to_owned(),
        20 => "二十".to_owned(),
        30 => "三十".to_owned(),
        1..=9 => format!("初{}", digit(day)),
        11..=19 => format!("十{}", digit(day - 10)),
        21..=29 => format!("廿{}", digit(day - 20)),
        _ => return None,
    };
    Some(name)
}

/// Looks up the traditional festival falling on a lunar month and day.
#[must_use]
pub fn lunar_festival(month: u32, day: u32) -> Option<&'static str> {
    LUNAR_FESTIVALS
        .iter()
        .find(|(festival_month, festival_day, _)| *festival_month == month && *festival_day == day)
        .map(|(_, _, name)| *name)
}

/// Looks up the solar term on a Gregorian date.
///
/// Terms are keyed by fixed month-day pairs and can be a day off from the
/// astronomical term in a given year.
#[must_use]
pub fn solar_term(date: NaiveDate) -> Option<&'static str> {
    SOLAR_TERMS
        .iter()
        .find(|(month, day, _)| *month == date.month() && *day == date.day())
        .map(|(_, _, name)| *name)
}
