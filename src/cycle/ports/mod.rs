//! Port contracts for cycle lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by cycle services.

mod notification;
mod repository;

pub use notification::{NotificationError, NotificationResult, NotificationScheduler};
pub use repository::{TaskCycleRepository, TaskCycleRepositoryError, TaskCycleRepositoryResult};
