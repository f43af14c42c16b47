//! Task lifecycle orchestration: creation, reads, edits, and status
//! transitions.

use crate::task::{
    domain::{
        DueDate, FieldUpdate, SpaceId, Task, TaskDomainError, TaskId, TaskPatch, TaskStatus,
        TaskTitle, UserId,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Upper bound on identifier regeneration after insert collisions.
const MAX_ID_ATTEMPTS: u32 = 3;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    space_id: SpaceId,
    created_by: UserId,
    title: String,
    description: Option<String>,
    due_date_text: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(space_id: SpaceId, created_by: UserId, title: impl Into<String>) -> Self {
        Self {
            space_id,
            created_by,
            title: title.into(),
            description: None,
            due_date_text: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date as user-supplied `YYYY-MM-DD` text.
    #[must_use]
    pub fn with_due_date_text(mut self, due_date_text: impl Into<String>) -> Self {
        self.due_date_text = Some(due_date_text.into());
        self
    }
}

/// Request payload for a partial task edit.
///
/// Each field is independently optional. `title` is applied only when
/// non-empty; `description` is applied whenever supplied, with the empty
/// string meaning clear; `due_date_text` is three-way: omitted leaves
/// the stored value, the empty string clears it, anything else is parsed
/// strictly before any write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    title: Option<String>,
    description: Option<String>,
    due_date_text: Option<String>,
}

impl EditTaskRequest {
    /// Creates an empty edit request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description, where the empty string means clear.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due-date text, where the empty string means clear.
    #[must_use]
    pub fn with_due_date_text(mut self, due_date_text: impl Into<String>) -> Self {
        self.due_date_text = Some(due_date_text.into());
        self
    }

    /// Interprets the request into a validated patch.
    ///
    /// All date-like fields are validated here, before any repository
    /// call, so a failing field leaves the stored record untouched.
    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let mut patch = TaskPatch::new();

        if let Some(title) = self.title
            && !title.trim().is_empty()
        {
            patch = patch.with_title(TaskTitle::new(title)?);
        }

        if let Some(description) = self.description {
            let update = if description.is_empty() {
                FieldUpdate::Clear
            } else {
                FieldUpdate::Set(description)
            };
            patch = patch.with_description(update);
        }

        if let Some(text) = self.due_date_text {
            let update = if text.is_empty() {
                FieldUpdate::Clear
            } else {
                FieldUpdate::Set(DueDate::parse(&text)?)
            };
            patch = patch.with_due_date(update);
        }

        Ok(patch)
    }
}

/// Outcome of an idempotent status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The task moved into the target status.
    Transitioned(Task),
    /// The task was already in the target status; nothing was written.
    AlreadyInState(Task),
}

impl TransitionOutcome {
    /// Returns the task carried by the outcome.
    #[must_use]
    pub const fn task(&self) -> &Task {
        match self {
            Self::Transitioned(task) | Self::AlreadyInState(task) => task,
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// No task exists under the given composite key.
    #[error("task {task_id} not found in space {space_id}")]
    NotFound {
        /// Space that was searched.
        space_id: SpaceId,
        /// Identifier that was not found.
        task_id: TaskId,
    },

    /// An edit request carried no effective field update.
    #[error("no changes provided for task {task_id}")]
    NoChangesProvided {
        /// Target of the empty edit.
        task_id: TaskId,
    },

    /// Identifier collisions persisted through every retry.
    #[error("exhausted {attempts} task identifier generation attempts")]
    IdGenerationExhausted {
        /// Number of attempted inserts.
        attempts: u32,
    },

    /// The requested status change is not a permitted transition.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Task refusing the transition.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every operation is an independent unit of work: no cross-call locks,
/// no multi-step sequence that assumes exclusivity. Read-modify-write
/// atomicity for merges is the repository's contract.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a pending task and persists it.
    ///
    /// The due date is validated before any store interaction, so a
    /// malformed date has no side effects. Identifier collisions on
    /// insert are retried with a fresh identifier up to a bounded count.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when validation fails, identifier
    /// generation is exhausted, or the store rejects the insert.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let due_date = request
            .due_date_text
            .as_deref()
            .map(DueDate::parse)
            .transpose()?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let task = Task::new(
                TaskId::generate(),
                request.space_id.clone(),
                request.created_by.clone(),
                title.clone(),
                request.description.clone(),
                due_date,
                &*self.clock,
            );

            match self.repository.insert(&task).await {
                Ok(()) => {
                    info!(space_id = %task.space_id(), task_id = %task.id(), "task created");
                    return Ok(task);
                }
                Err(TaskRepositoryError::Duplicate { task_id, .. }) => {
                    warn!(%task_id, attempt, "task identifier collision, regenerating");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(TaskLifecycleError::IdGenerationExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Looks up a single task; direct passthrough to the repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn get(
        &self,
        space_id: &SpaceId,
        task_id: &TaskId,
    ) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.fetch_by_id(space_id, task_id).await?)
    }

    /// Lists the pending tasks of a space.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn list_pending(&self, space_id: &SpaceId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self
            .repository
            .fetch_by_status(space_id, TaskStatus::Pending)
            .await?)
    }

    /// Marks a task done.
    ///
    /// Idempotent: a task already done short-circuits to
    /// [`TransitionOutcome::AlreadyInState`] without a write. A deleted
    /// task refuses the transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist in the space, or [`TaskLifecycleError::InvalidTransition`]
    /// when the current status forbids completion.
    pub async fn mark_done(
        &self,
        space_id: &SpaceId,
        task_id: &TaskId,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        self.transition(space_id, task_id, TaskStatus::Done).await
    }

    /// Soft-deletes a task, regardless of whether it is pending or done.
    ///
    /// Idempotent: a task already deleted short-circuits to
    /// [`TransitionOutcome::AlreadyInState`] without a write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist in the space.
    pub async fn soft_delete(
        &self,
        space_id: &SpaceId,
        task_id: &TaskId,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        self.transition(space_id, task_id, TaskStatus::Deleted).await
    }

    /// Applies a partial edit and returns the merged post-update record.
    ///
    /// All-or-nothing: every date-like field is validated before the
    /// single repository merge, and an empty effective patch returns
    /// [`TaskLifecycleError::NoChangesProvided`] without touching the
    /// repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when validation fails, the task is
    /// absent, or the store fails.
    pub async fn edit(
        &self,
        space_id: &SpaceId,
        task_id: &TaskId,
        request: EditTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let patch = request.into_patch()?;
        if patch.is_empty() {
            return Err(TaskLifecycleError::NoChangesProvided {
                task_id: task_id.clone(),
            });
        }

        let updated = self
            .repository
            .update_fields(space_id, task_id, patch)
            .await?
            .ok_or_else(|| TaskLifecycleError::NotFound {
                space_id: space_id.clone(),
                task_id: task_id.clone(),
            })?;

        debug!(space_id = %space_id, task_id = %task_id, "task edited");
        Ok(updated)
    }

    /// Shared transition path for `mark_done` and `soft_delete`.
    async fn transition(
        &self,
        space_id: &SpaceId,
        task_id: &TaskId,
        target: TaskStatus,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let not_found = || TaskLifecycleError::NotFound {
            space_id: space_id.clone(),
            task_id: task_id.clone(),
        };

        let current = self
            .repository
            .fetch_by_id(space_id, task_id)
            .await?
            .ok_or_else(not_found)?;

        if current.status() == target {
            debug!(space_id = %space_id, task_id = %task_id, status = %target, "already in state");
            return Ok(TransitionOutcome::AlreadyInState(current));
        }
        if !current.status().can_transition_to(target) {
            return Err(TaskLifecycleError::InvalidTransition {
                task_id: task_id.clone(),
                from: current.status(),
                to: target,
            });
        }

        let patch = TaskPatch::new().with_status(target);
        let updated = self
            .repository
            .update_fields(space_id, task_id, patch)
            .await?
            .ok_or_else(not_found)?;

        info!(space_id = %space_id, task_id = %task_id, status = %target, "task transitioned");
        Ok(TransitionOutcome::Transitioned(updated))
    }
}
