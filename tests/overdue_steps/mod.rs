//! Step definitions for overdue remediation scenarios.

mod given;
mod then;
mod when;
pub mod world;
