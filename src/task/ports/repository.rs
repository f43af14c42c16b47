//! Repository ports for task and space-configuration persistence.
//!
//! The concrete store is a remote key-record service owned by an
//! external client; these contracts are everything the services may
//! assume about it. Every operation is scoped by [`SpaceId`].

use crate::task::domain::{
    SpaceConfig, SpaceConfigPatch, SpaceId, Task, TaskId, TaskPatch, TaskStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task under its `(space_id, task_id)` composite key.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Duplicate`] when the key already
    /// exists, or [`TaskRepositoryError::Unavailable`] on store failure.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier within a space.
    ///
    /// Returns `None` when the task does not exist in that space; a task
    /// is never returned for any other space.
    async fn fetch_by_id(
        &self,
        space_id: &SpaceId,
        task_id: &TaskId,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks in a space carrying the given status.
    ///
    /// Ordering is stable across repeated calls absent writes; callers
    /// must not depend on any particular order beyond that.
    async fn fetch_by_status(
        &self,
        space_id: &SpaceId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Merges the patch into the stored record as a single atomic
    /// read-modify-write and returns the post-update record.
    ///
    /// Returns `None` when the record does not exist; implementations
    /// must never create a record from a patch.
    async fn update_fields(
        &self,
        space_id: &SpaceId,
        task_id: &TaskId,
        patch: TaskPatch,
    ) -> TaskRepositoryResult<Option<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same composite key already exists.
    #[error("duplicate task {task_id} in space {space_id}")]
    Duplicate {
        /// Space scoping the collision.
        space_id: SpaceId,
        /// Colliding task identifier.
        task_id: TaskId,
    },

    /// The underlying store failed or was unreachable.
    #[error("task store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a store failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}

/// Result type for space-configuration repository operations.
pub type SpaceConfigRepositoryResult<T> = Result<T, SpaceConfigRepositoryError>;

/// Space-configuration persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpaceConfigRepository: Send + Sync {
    /// Finds the configuration record for a space.
    ///
    /// Returns `None` when the space has never been configured.
    async fn get(&self, space_id: &SpaceId) -> SpaceConfigRepositoryResult<Option<SpaceConfig>>;

    /// Stores the first configuration record for a space.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceConfigRepositoryError::Duplicate`] when the space
    /// already has a record.
    async fn insert(&self, config: &SpaceConfig) -> SpaceConfigRepositoryResult<()>;

    /// Merges the patch into the stored record and returns the
    /// post-update record, or `None` when the space has no record.
    async fn update(
        &self,
        space_id: &SpaceId,
        patch: SpaceConfigPatch,
    ) -> SpaceConfigRepositoryResult<Option<SpaceConfig>>;
}

/// Errors returned by space-configuration repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SpaceConfigRepositoryError {
    /// The space already has a configuration record.
    #[error("duplicate configuration for space {0}")]
    Duplicate(SpaceId),

    /// The underlying store failed or was unreachable.
    #[error("configuration store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl SpaceConfigRepositoryError {
    /// Wraps a store failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
