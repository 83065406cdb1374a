//! Application services for cycle lifecycle orchestration.

mod config;
mod error;
mod lifecycle;

pub use config::LifecycleConfig;
pub use error::{CollaboratorFailure, CycleLifecycleError, CycleLifecycleResult};
pub use lifecycle::{CompletionOutcome, CycleLifecycleService, OverdueOutcome};
