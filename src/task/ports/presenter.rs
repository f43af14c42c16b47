//! Presentation port mapping task records to display payloads.
//!
//! The chat integration layer turns a [`DisplayPayload`] into its own
//! rich reply format; the core only guarantees this neutral structure.

use crate::task::domain::Task;
use serde::{Deserialize, Serialize};

/// Neutral, human-readable summary structure for chat replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPayload {
    /// Headline of the reply.
    pub title: String,
    /// Optional free-form body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Labelled key/value detail fields, in display order.
    pub fields: Vec<DisplayField>,
}

/// Single labelled value within a [`DisplayPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayField {
    /// Field label.
    pub name: String,
    /// Field value.
    pub value: String,
}

impl DisplayField {
    /// Creates a labelled field.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Contract for rendering task records into display payloads.
pub trait TaskPresenter: Send + Sync {
    /// Renders a single task in full detail.
    ///
    /// `created_by_name` is the resolved display name of the task's
    /// creator; callers fall back to the raw user identifier when the
    /// platform lookup is unavailable.
    fn render_task(&self, task: &Task, created_by_name: &str) -> DisplayPayload;

    /// Renders a collection of tasks as a summary list.
    fn render_task_list(&self, tasks: &[Task]) -> DisplayPayload;
}
