//! Three-state partial-update types for optional fields.
//!
//! Callers must be able to express three intents for every optional
//! field: leave it unchanged, clear it, or set a new value. A sentinel
//! such as `None` cannot carry all three, so patches are built from an
//! explicit [`FieldUpdate`] per field.

use super::{DueDate, TaskStatus, TaskTitle};
use serde::{Deserialize, Serialize};

/// Update intent for a single optional field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "value")]
pub enum FieldUpdate<T> {
    /// Leave the stored value unchanged.
    #[default]
    Keep,
    /// Clear the stored value to absent.
    Clear,
    /// Replace the stored value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Returns `true` when the update leaves the field unchanged.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Applies the update to the current stored value.
    #[must_use]
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }
}

/// Validated partial update for a task record.
///
/// Only the fields carrying an update are merged into the stored record;
/// the repository applies the merge as a single read-modify-write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// Replacement title, when one was supplied. Titles are required, so
    /// there is no clear intent for this field.
    pub title: Option<TaskTitle>,
    /// Description update.
    pub description: FieldUpdate<String>,
    /// Due-date update.
    pub due_date: FieldUpdate<DueDate>,
    /// Status replacement, used by lifecycle transitions.
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the description update.
    #[must_use]
    pub fn with_description(mut self, update: FieldUpdate<String>) -> Self {
        self.description = update;
        self
    }

    /// Sets the due-date update.
    #[must_use]
    pub fn with_due_date(mut self, update: FieldUpdate<DueDate>) -> Self {
        self.due_date = update;
        self
    }

    /// Sets a status replacement.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` when applying the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_keep()
            && self.due_date.is_keep()
            && self.status.is_none()
    }
}
