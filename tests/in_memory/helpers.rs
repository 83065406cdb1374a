//! Shared fixtures for in-memory cycle lifecycle tests.

use std::sync::Arc;

use crate::test_helpers::FixedClock;
use cadence::cycle::{
    adapters::memory::{InMemoryNotificationScheduler, InMemoryTaskCycleRepository},
    domain::Task,
    services::CycleLifecycleService,
};
use cadence::recurrence::RecurrencePattern;
use rstest::fixture;

/// Service wired to the in-memory adapters.
pub type MemoryService = CycleLifecycleService<
    InMemoryTaskCycleRepository,
    InMemoryNotificationScheduler<FixedClock>,
    FixedClock,
>;

/// Service plus handles on its collaborators.
pub struct Harness {
    pub service: MemoryService,
    pub repository: Arc<InMemoryTaskCycleRepository>,
    pub scheduler: Arc<InMemoryNotificationScheduler<FixedClock>>,
    pub clock: Arc<FixedClock>,
}

/// Builds a harness frozen at the given instant.
pub fn harness_at(rfc3339: &str) -> Harness {
    let clock = Arc::new(FixedClock::at(rfc3339));
    let repository = Arc::new(InMemoryTaskCycleRepository::new());
    let scheduler = Arc::new(InMemoryNotificationScheduler::new(Arc::clone(&clock)));
    let service = CycleLifecycleService::new(
        Arc::clone(&repository),
        Arc::clone(&scheduler),
        Arc::clone(&clock),
    );
    Harness {
        service,
        repository,
        scheduler,
        clock,
    }
}

/// Provides a harness frozen at 2024-06-15 12:00 UTC.
#[fixture]
pub fn harness() -> Harness {
    harness_at("2024-06-15T12:00:00Z")
}

/// Provides an active, auto-restarting daily task.
#[fixture]
pub fn daily_task() -> Task {
    Task::new(
        "Take vitamins",
        RecurrencePattern::daily(1).expect("daily pattern is valid"),
    )
}
