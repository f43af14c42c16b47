//! Application services for task lifecycle orchestration.

mod commands;
mod lifecycle;
mod space_config;

pub use commands::{CommandError, CommandReply, CommandResult, CommandRouter, TaskCommand};
pub use lifecycle::{
    CreateTaskRequest, EditTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TransitionOutcome,
};
pub use space_config::{SpaceConfigError, SpaceConfigResult, SpaceConfigService};
