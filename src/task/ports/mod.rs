//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod chat;
pub mod presenter;
pub mod repository;

pub use chat::{ChatGateway, ChatGatewayError, ChatGatewayResult};
pub use presenter::{DisplayField, DisplayPayload, TaskPresenter};
pub use repository::{
    SpaceConfigRepository, SpaceConfigRepositoryError, SpaceConfigRepositoryResult,
    TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};
