//! Command surface for the chat integration layer.
//!
//! Each chat command maps onto one lifecycle or configuration
//! operation. The router returns either a rendered reply payload or a
//! typed error; turning errors into user-facing messages is the chat
//! layer's responsibility.

use super::{
    CreateTaskRequest, EditTaskRequest, SpaceConfigError, SpaceConfigService, TaskLifecycleError,
    TaskLifecycleService, TransitionOutcome,
};
use crate::task::{
    domain::{ChannelId, SpaceConfig, SpaceId, Task, TaskId, UserId},
    ports::{ChatGateway, DisplayPayload, SpaceConfigRepository, TaskPresenter, TaskRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Structured command payload received from the chat layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// `task_add`: create a task.
    Add {
        /// Task title.
        title: String,
        /// Optional description.
        description: Option<String>,
        /// Optional due date in `YYYY-MM-DD` text form.
        due_date: Option<String>,
    },
    /// `task_list`: list pending tasks.
    List,
    /// `task_detail`: show one task.
    Detail {
        /// Target task identifier.
        task_id: String,
    },
    /// `task_done`: mark a task done.
    Done {
        /// Target task identifier.
        task_id: String,
    },
    /// `task_edit`: partially edit a task.
    Edit {
        /// Target task identifier.
        task_id: String,
        /// Replacement title; empty or omitted leaves it unchanged.
        title: Option<String>,
        /// Description; the empty string clears it.
        description: Option<String>,
        /// Due date text; the empty string clears it.
        due_date: Option<String>,
    },
    /// `task_delete`: soft-delete a task.
    Delete {
        /// Target task identifier.
        task_id: String,
    },
    /// `config`: set or clear the space notification channel.
    Config {
        /// Channel to notify in, or `None` to unset.
        notification_channel_id: Option<ChannelId>,
    },
}

/// Successful command reply for the chat layer to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// A task was created.
    TaskCreated(DisplayPayload),
    /// Detail view of one task.
    TaskDetail(DisplayPayload),
    /// Pending-task listing.
    TaskList(DisplayPayload),
    /// A status transition was applied.
    Transitioned(DisplayPayload),
    /// The task was already in the requested status; nothing changed.
    AlreadyInState(DisplayPayload),
    /// A task edit was applied.
    TaskUpdated(DisplayPayload),
    /// The space configuration was saved.
    ConfigSaved(SpaceConfig),
}

/// Errors surfaced by command dispatch.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Task lifecycle operation failed.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),

    /// Space configuration operation failed.
    #[error(transparent)]
    Config(#[from] SpaceConfigError),
}

/// Result type for command dispatch.
pub type CommandResult = Result<CommandReply, CommandError>;

/// Maps chat commands onto the task and configuration services.
#[derive(Clone)]
pub struct CommandRouter<R, Q, C, G, P>
where
    R: TaskRepository,
    Q: SpaceConfigRepository,
    C: Clock + Send + Sync,
    G: ChatGateway,
    P: TaskPresenter,
{
    lifecycle: TaskLifecycleService<R, C>,
    space_config: SpaceConfigService<Q, G>,
    gateway: Arc<G>,
    presenter: P,
}

impl<R, Q, C, G, P> CommandRouter<R, Q, C, G, P>
where
    R: TaskRepository,
    Q: SpaceConfigRepository,
    C: Clock + Send + Sync,
    G: ChatGateway,
    P: TaskPresenter,
{
    /// Creates a router over the given services and presenter.
    ///
    /// The gateway is used to resolve creator display names for single-
    /// task replies; sharing the `Arc` with the space-config service is
    /// expected.
    #[must_use]
    pub const fn new(
        lifecycle: TaskLifecycleService<R, C>,
        space_config: SpaceConfigService<Q, G>,
        gateway: Arc<G>,
        presenter: P,
    ) -> Self {
        Self {
            lifecycle,
            space_config,
            gateway,
            presenter,
        }
    }

    /// Dispatches one command on behalf of a user in a space.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] carrying the underlying service error;
    /// malformed task identifiers surface as domain validation errors.
    pub async fn dispatch(
        &self,
        space_id: &SpaceId,
        user_id: &UserId,
        command: TaskCommand,
    ) -> CommandResult {
        match command {
            TaskCommand::Add {
                title,
                description,
                due_date,
            } => {
                let mut request =
                    CreateTaskRequest::new(space_id.clone(), user_id.clone(), title);
                if let Some(text) = description {
                    request = request.with_description(text);
                }
                if let Some(text) = due_date {
                    request = request.with_due_date_text(text);
                }
                let task = self.lifecycle.create(request).await?;
                Ok(CommandReply::TaskCreated(self.render_single(&task).await))
            }

            TaskCommand::List => {
                let tasks = self.lifecycle.list_pending(space_id).await?;
                Ok(CommandReply::TaskList(
                    self.presenter.render_task_list(&tasks),
                ))
            }

            TaskCommand::Detail { task_id } => {
                let id = parse_task_id(&task_id)?;
                let task = self.lifecycle.get(space_id, &id).await?.ok_or_else(|| {
                    TaskLifecycleError::NotFound {
                        space_id: space_id.clone(),
                        task_id: id,
                    }
                })?;
                Ok(CommandReply::TaskDetail(self.render_single(&task).await))
            }

            TaskCommand::Done { task_id } => {
                let id = parse_task_id(&task_id)?;
                let outcome = self.lifecycle.mark_done(space_id, &id).await?;
                Ok(self.render_outcome(&outcome).await)
            }

            TaskCommand::Delete { task_id } => {
                let id = parse_task_id(&task_id)?;
                let outcome = self.lifecycle.soft_delete(space_id, &id).await?;
                Ok(self.render_outcome(&outcome).await)
            }

            TaskCommand::Edit {
                task_id,
                title,
                description,
                due_date,
            } => {
                let id = parse_task_id(&task_id)?;
                let mut request = EditTaskRequest::new();
                if let Some(text) = title {
                    request = request.with_title(text);
                }
                if let Some(text) = description {
                    request = request.with_description(text);
                }
                if let Some(text) = due_date {
                    request = request.with_due_date_text(text);
                }
                let task = self.lifecycle.edit(space_id, &id, request).await?;
                Ok(CommandReply::TaskUpdated(self.render_single(&task).await))
            }

            TaskCommand::Config {
                notification_channel_id,
            } => {
                let config = self
                    .space_config
                    .set_notification_channel(space_id, notification_channel_id)
                    .await?;
                Ok(CommandReply::ConfigSaved(config))
            }
        }
    }

    /// Resolves the creator's display name, degrading to the raw
    /// identifier when the platform lookup fails. Presentation never
    /// fails a command.
    async fn creator_name(&self, user_id: &UserId) -> String {
        match self.gateway.resolve_display_name(user_id).await {
            Ok(name) => name,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "display name lookup failed");
                user_id.as_str().to_owned()
            }
        }
    }

    /// Renders a single-task payload with the creator name resolved.
    async fn render_single(&self, task: &Task) -> DisplayPayload {
        let created_by_name = self.creator_name(task.created_by()).await;
        self.presenter.render_task(task, &created_by_name)
    }

    /// Renders a transition outcome into the matching reply variant.
    async fn render_outcome(&self, outcome: &TransitionOutcome) -> CommandReply {
        let payload = self.render_single(outcome.task()).await;
        match outcome {
            TransitionOutcome::Transitioned(_) => CommandReply::Transitioned(payload),
            TransitionOutcome::AlreadyInState(_) => CommandReply::AlreadyInState(payload),
        }
    }
}

/// Validates a caller-supplied task identifier.
fn parse_task_id(value: &str) -> Result<TaskId, CommandError> {
    TaskId::parse(value)
        .map_err(TaskLifecycleError::from)
        .map_err(CommandError::from)
}
