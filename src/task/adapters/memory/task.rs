//! In-memory task repository.
//!
//! Contract reference for the repository port: space-scoped composite
//! keys, duplicate detection on insert, merge-only updates under a
//! single write lock, and insertion-ordered listings.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{SpaceId, Task, TaskId, TaskPatch, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Composite record key: every lookup is scoped by space.
type RecordKey = (SpaceId, TaskId);

/// Thread-safe in-memory task repository.
#[derive(Debug)]
pub struct InMemoryTaskRepository<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<RecordKey, Task>,
    insertion_order: Vec<RecordKey>,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository stamping updates with the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }
}

impl<C> Clone for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// Maps a poisoned lock to a store-unavailable error.
fn lock_poisoned<G>(err: std::sync::PoisonError<G>) -> TaskRepositoryError {
    TaskRepositoryError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let key = (task.space_id().clone(), task.id().clone());
        if state.tasks.contains_key(&key) {
            return Err(TaskRepositoryError::Duplicate {
                space_id: task.space_id().clone(),
                task_id: task.id().clone(),
            });
        }
        state.insertion_order.push(key.clone());
        state.tasks.insert(key, task.clone());
        Ok(())
    }

    async fn fetch_by_id(
        &self,
        space_id: &SpaceId,
        task_id: &TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let key = (space_id.clone(), task_id.clone());
        Ok(state.tasks.get(&key).cloned())
    }

    async fn fetch_by_status(
        &self,
        space_id: &SpaceId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let tasks = state
            .insertion_order
            .iter()
            .filter(|(space, _)| space == space_id)
            .filter_map(|key| state.tasks.get(key))
            .filter(|task| task.status() == status)
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn update_fields(
        &self,
        space_id: &SpaceId,
        task_id: &TaskId,
        patch: TaskPatch,
    ) -> TaskRepositoryResult<Option<Task>> {
        // Single write lock spans the whole read-modify-write, which is
        // the atomicity the port contract promises.
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let key = (space_id.clone(), task_id.clone());
        let Some(task) = state.tasks.get_mut(&key) else {
            return Ok(None);
        };
        task.apply_patch(patch, &*self.clock);
        Ok(Some(task.clone()))
    }
}
