//! Task cycle lifecycle management.
//!
//! A cycle is one occurrence of a recurring task: a start instant, a due
//! instant computed by the recurrence evaluator, and a completion or overdue
//! flag. This module creates first cycles, completes them with optional
//! auto-restart, and applies the reset, continue, and skip remediation
//! policies to overdue cycles. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
