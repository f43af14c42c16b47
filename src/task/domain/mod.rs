//! Domain model for task lifecycle management.
//!
//! The task domain models space-scoped task records, strict due-date
//! parsing, lifecycle status transitions, and explicit three-state
//! partial updates while keeping all infrastructure concerns outside of
//! the domain boundary.

mod date;
mod error;
mod ids;
mod space_config;
mod task;
mod update;

pub use date::DueDate;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{ChannelId, SpaceId, TaskId, TaskTitle, UserId};
pub use space_config::{SpaceConfig, SpaceConfigPatch};
pub use task::{PersistedTaskData, Task, TaskStatus};
pub use update::{FieldUpdate, TaskPatch};
