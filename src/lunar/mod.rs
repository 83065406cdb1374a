//! Chinese lunar calendar support.
//!
//! Converts between Gregorian (solar) dates and lunar dates for lunar years
//! 1900 through 2100, derives display labels (zodiac, stem-branch year names,
//! month and day names, festivals, approximate solar terms), and performs
//! month and year arithmetic in the lunar calendar.
//!
//! Every function here is pure and synchronous. Conversion functions return
//! [`LunarResult`]; the date-picker helpers [`convert_to_lunar`],
//! [`convert_to_solar`], and [`add_lunar_time`] never fail and fall back to a
//! documented default instead.

mod arithmetic;
mod convert;
mod error;
mod labels;
mod table;
mod text;

pub use arithmetic::{LunarUnit, add_lunar_time, try_add_lunar_months, try_add_lunar_years};
pub use convert::{
    LunarDate, leap_month, leap_month_days, lunar_month_days, lunar_to_solar, lunar_year_days,
    solar_to_lunar,
};
pub use error::{LunarError, LunarResult};
pub use labels::{
    Zodiac, lunar_day_name, lunar_festival, lunar_month_name, solar_term, stem_branch,
};
pub use table::{FIRST_LUNAR_YEAR, LAST_LUNAR_YEAR};
pub use text::{
    LunarInfo, convert_to_lunar, convert_to_solar, format_lunar_date, full_lunar_info,
    parse_lunar_date,
};

pub(crate) use arithmetic::{add_solar_days, add_solar_months, at_time_of};

#[cfg(test)]
mod tests;
