//! Recurrence pattern evaluation.
//!
//! A [`RecurrencePattern`] describes how a task repeats. The evaluator turns
//! a cycle's start instant into its due instant, and a due instant back into
//! an approximate start, in either the solar or the lunar calendar. Patterns
//! cross storage boundaries as [`PatternRecord`] values, the flat JSON shape
//! the app persists; converting a record into a pattern validates it.
//!
//! Evaluation is pure: it never reads the clock and reports failures as
//! [`RecurrenceError`] values. [`calculate_due_date_or_fallback`] is the one
//! lenient entry point, intended for previews only.

mod calendar;
mod config;
mod error;
mod evaluator;
mod pattern;
mod record;

pub use config::{DEFAULT_FALLBACK_INTERVAL_DAYS, EvaluatorConfig};
pub use error::{ParseDateTypeError, RecurrenceError, RecurrenceResult};
pub use evaluator::{
    calculate_due_date, calculate_due_date_or_fallback, calculate_due_date_str,
    calculate_start_date, calculate_start_date_str, format_instant, parse_date_input,
};
pub use pattern::{
    CompositeOffsets, CustomUnit, DateType, Interval, RecurrencePattern, WeekOfMonth,
    weekday_from_index, weekday_index,
};
pub use record::PatternRecord;

#[cfg(test)]
mod tests;
