//! In-memory adapters for tests and local deterministic flows.

mod notification;
mod repository;

pub use notification::{InMemoryNotificationScheduler, ScheduledNotification};
pub use repository::InMemoryTaskCycleRepository;
