//! In-memory repository for cycle lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::cycle::{
    domain::{CycleId, TaskCycle, TaskId},
    ports::{TaskCycleRepository, TaskCycleRepositoryError, TaskCycleRepositoryResult},
};

/// Thread-safe in-memory cycle repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskCycleRepository {
    state: Arc<RwLock<InMemoryCycleState>>,
}

#[derive(Debug, Default)]
struct InMemoryCycleState {
    cycles: HashMap<CycleId, TaskCycle>,
    task_index: HashMap<TaskId, Vec<CycleId>>,
}

impl InMemoryTaskCycleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored cycles.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn cycle_count(&self) -> TaskCycleRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            TaskCycleRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.cycles.len())
    }
}

#[async_trait]
impl TaskCycleRepository for InMemoryTaskCycleRepository {
    async fn save(&self, cycle: &TaskCycle) -> TaskCycleRepositoryResult<TaskCycle> {
        let mut state = self.state.write().map_err(|err| {
            TaskCycleRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if let Some(id) = cycle.id() {
            let stored = state
                .cycles
                .get_mut(&id)
                .ok_or(TaskCycleRepositoryError::NotFound(id))?;
            *stored = cycle.clone();
            return Ok(cycle.clone());
        }

        let id = CycleId::new();
        let saved = cycle.clone().with_id(id);
        state.cycles.insert(id, saved.clone());
        state.task_index.entry(saved.task_id()).or_default().push(id);
        Ok(saved)
    }

    async fn find_by_task_id(&self, task_id: TaskId) -> TaskCycleRepositoryResult<Vec<TaskCycle>> {
        let state = self.state.read().map_err(|err| {
            TaskCycleRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut cycles: Vec<TaskCycle> = state
            .task_index
            .get(&task_id)
            .into_iter()
            .flatten()
            .filter_map(|id| state.cycles.get(id))
            .cloned()
            .collect();
        // Stable sort keeps insertion order for cycles created in the same instant.
        cycles.sort_by_key(TaskCycle::created_at);
        Ok(cycles)
    }
}
