//! Task aggregate root and lifecycle status machinery.

use super::{DueDate, ParseTaskStatusError, SpaceId, TaskId, TaskPatch, TaskTitle, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is open and awaiting completion.
    Pending,
    /// Task has been completed.
    Done,
    /// Task has been soft-deleted; the record stays in storage.
    Deleted,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
            Self::Deleted => "deleted",
        }
    }

    /// Returns `true` when the status admits a transition to `target`.
    ///
    /// `deleted` is terminal: no command surface reopens or undeletes a
    /// task, and a deleted task cannot be resurrected by completion.
    /// `done` only admits deletion. Same-status transitions are handled
    /// upstream as idempotent no-ops, never as transitions.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Done | Self::Deleted) | (Self::Done, Self::Deleted)
        )
    }

    /// Returns `true` when no further transitions leave this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            "deleted" => Ok(Self::Deleted),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task aggregate root.
///
/// The serialized form is the persisted record shape consumed by the
/// external key-record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task_id")]
    id: TaskId,
    space_id: SpaceId,
    title: TaskTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<DueDate>,
    status: TaskStatus,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning-space identifier.
    pub space_id: SpaceId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<DueDate>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creator identifier.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest-mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    #[must_use]
    pub fn new(
        id: TaskId,
        space_id: SpaceId,
        created_by: UserId,
        title: TaskTitle,
        description: Option<String>,
        due_date: Option<DueDate>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            space_id,
            title,
            description,
            due_date,
            status: TaskStatus::Pending,
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            space_id: data.space_id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owning-space identifier.
    #[must_use]
    pub const fn space_id(&self) -> &SpaceId {
        &self.space_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creator identifier.
    #[must_use]
    pub const fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest-mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Merges a patch into the record, field by field.
    ///
    /// Merge semantics only; transition validation is the lifecycle
    /// service's responsibility. Touches `updated_at` when any field
    /// carried an update.
    pub fn apply_patch(&mut self, patch: TaskPatch, clock: &impl Clock) {
        if patch.is_empty() {
            return;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        self.description = patch.description.apply(self.description.take());
        self.due_date = patch.due_date.apply(self.due_date);
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = clock.utc();
    }
}
