//! Cadence: recurrence and cycle engine for recurring reminders.
//!
//! This crate computes when recurring tasks are due and manages the cycles
//! that track each occurrence. It supports daily, weekly, monthly, yearly,
//! week-of-month, custom, and composite patterns in both the Gregorian and
//! the Chinese lunar calendar.
//!
//! # Architecture
//!
//! The pure calculation layers never read the clock or touch I/O. The cycle
//! lifecycle follows hexagonal architecture principles:
//!
//! - **Domain**: Cycles and the task configuration they are computed from
//! - **Ports**: Abstract storage and notification scheduler interfaces
//! - **Adapters**: In-memory implementations of the ports
//!
//! # Modules
//!
//! - [`lunar`]: Lunar/solar conversion, labels, and lunar date arithmetic
//! - [`recurrence`]: Recurrence patterns and due-date evaluation
//! - [`cycle`]: Cycle creation, completion, and overdue remediation

pub mod cycle;
pub mod lunar;
pub mod recurrence;

#[cfg(test)]
mod test_support;
