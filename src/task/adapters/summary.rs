//! Reference presenter rendering tasks as plain key/value summaries.
//!
//! Mirrors the field layout the chat layer shows in its rich replies
//! (identifier, status, due date, creator, creation time) without any
//! platform-specific formatting.

use crate::task::{
    domain::Task,
    ports::{DisplayField, DisplayPayload, TaskPresenter},
};

/// Shown for optional fields that carry no value.
const UNSET: &str = "unset";

/// Plain-text summary presenter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryPresenter;

impl SummaryPresenter {
    /// Creates a summary presenter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TaskPresenter for SummaryPresenter {
    fn render_task(&self, task: &Task, created_by_name: &str) -> DisplayPayload {
        let due = task
            .due_date()
            .map_or_else(|| UNSET.to_owned(), |date| date.format());
        DisplayPayload {
            title: task.title().as_str().to_owned(),
            body: task.description().map(str::to_owned),
            fields: vec![
                DisplayField::new("id", task.id().as_str()),
                DisplayField::new("status", task.status().as_str()),
                DisplayField::new("due", due),
                DisplayField::new("created by", created_by_name),
                DisplayField::new(
                    "created at",
                    task.created_at().format("%Y-%m-%d %H:%M UTC").to_string(),
                ),
            ],
        }
    }

    fn render_task_list(&self, tasks: &[Task]) -> DisplayPayload {
        if tasks.is_empty() {
            return DisplayPayload {
                title: "Pending tasks".to_owned(),
                body: Some("No pending tasks.".to_owned()),
                fields: Vec::new(),
            };
        }

        let fields = tasks
            .iter()
            .map(|task| {
                let due = task
                    .due_date()
                    .map_or_else(|| UNSET.to_owned(), |date| date.format());
                DisplayField::new(
                    format!("[{}] {}", task.id(), task.title()),
                    format!("due: {due} | status: {}", task.status()),
                )
            })
            .collect();

        DisplayPayload {
            title: "Pending tasks".to_owned(),
            body: None,
            fields,
        }
    }
}
