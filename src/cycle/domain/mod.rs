//! Domain model for task cycles.
//!
//! Cycles carry their start and due instants and completion state. Tasks are
//! read-only inputs holding the recurrence configuration.

mod cycle;
mod error;
mod ids;
mod overdue;
mod task;

pub use cycle::{CycleResolution, CycleState, PersistedCycleData, TaskCycle};
pub use error::CycleDomainError;
pub use ids::{CycleId, NotificationId, TaskId};
pub use overdue::{OverdueAction, ParseOverdueActionError};
pub use task::{PersistedTaskData, Task};
