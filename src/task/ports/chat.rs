//! Chat-platform gateway port.
//!
//! The services never hold the chat framework's connection object;
//! they receive this narrow capability instead.

use crate::task::domain::{ChannelId, SpaceId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for chat gateway operations.
pub type ChatGatewayResult<T> = Result<T, ChatGatewayError>;

/// Narrow capability interface onto the chat platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Returns `true` when the channel exists in the space and can
    /// receive text messages.
    async fn is_text_channel(
        &self,
        space_id: &SpaceId,
        channel_id: ChannelId,
    ) -> ChatGatewayResult<bool>;

    /// Resolves a user identifier to a display name for presentation.
    async fn resolve_display_name(&self, user_id: &UserId) -> ChatGatewayResult<String>;
}

/// Errors returned by chat gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum ChatGatewayError {
    /// The chat platform failed or was unreachable.
    #[error("chat platform unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChatGatewayError {
    /// Wraps a platform failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
