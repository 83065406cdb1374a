//! Shared world state for overdue remediation scenarios.

use std::sync::Arc;

use crate::test_helpers::FixedClock;
use cadence::cycle::{
    adapters::memory::{InMemoryNotificationScheduler, InMemoryTaskCycleRepository},
    domain::{Task, TaskCycle},
    services::{CycleLifecycleResult, CycleLifecycleService, OverdueOutcome},
};
use rstest::fixture;

/// Instant every scenario starts at.
pub const SCENARIO_NOW: &str = "2024-06-15T12:00:00Z";

/// Service type used by the BDD world.
pub type OverdueService = CycleLifecycleService<
    InMemoryTaskCycleRepository,
    InMemoryNotificationScheduler<FixedClock>,
    FixedClock,
>;

/// Scenario world for overdue remediation behaviour tests.
pub struct OverdueWorld {
    pub service: OverdueService,
    pub repository: Arc<InMemoryTaskCycleRepository>,
    pub scheduler: Arc<InMemoryNotificationScheduler<FixedClock>>,
    pub task: Option<Task>,
    pub overdue_cycle: Option<TaskCycle>,
    pub last_outcome: Option<CycleLifecycleResult<OverdueOutcome>>,
}

impl OverdueWorld {
    /// Creates a world frozen at [`SCENARIO_NOW`].
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::at(SCENARIO_NOW));
        let repository = Arc::new(InMemoryTaskCycleRepository::new());
        let scheduler = Arc::new(InMemoryNotificationScheduler::new(Arc::clone(&clock)));
        let service = CycleLifecycleService::new(
            Arc::clone(&repository),
            Arc::clone(&scheduler),
            clock,
        );
        Self {
            service,
            repository,
            scheduler,
            task: None,
            overdue_cycle: None,
            last_outcome: None,
        }
    }

    /// Returns the successful remediation outcome.
    pub fn outcome(&self) -> Result<&OverdueOutcome, eyre::Report> {
        self.last_outcome
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing remediation result in scenario world"))?
            .as_ref()
            .map_err(|err| eyre::eyre!("unexpected remediation failure: {err}"))
    }
}

impl Default for OverdueWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OverdueWorld {
    OverdueWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
