//! Space configuration service: create-or-update of the per-space
//! administrative record.

use crate::task::{
    domain::{ChannelId, FieldUpdate, SpaceConfig, SpaceConfigPatch, SpaceId},
    ports::{ChatGateway, ChatGatewayError, SpaceConfigRepository, SpaceConfigRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for space configuration operations.
#[derive(Debug, Error)]
pub enum SpaceConfigError {
    /// The channel does not exist in the space or is not text-capable.
    #[error("channel {0} is not a text channel in this space")]
    InvalidChannelReference(ChannelId),

    /// Chat-platform validation failed.
    #[error(transparent)]
    Gateway(#[from] ChatGatewayError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SpaceConfigRepositoryError),
}

/// Result type for space configuration service operations.
pub type SpaceConfigResult<T> = Result<T, SpaceConfigError>;

/// Space configuration orchestration service.
#[derive(Clone)]
pub struct SpaceConfigService<R, G>
where
    R: SpaceConfigRepository,
    G: ChatGateway,
{
    repository: Arc<R>,
    gateway: Arc<G>,
}

impl<R, G> SpaceConfigService<R, G>
where
    R: SpaceConfigRepository,
    G: ChatGateway,
{
    /// Creates a new space configuration service.
    #[must_use]
    pub const fn new(repository: Arc<R>, gateway: Arc<G>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// Retrieves the configuration record for a space, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceConfigError::Repository`] when the store fails.
    pub async fn get(&self, space_id: &SpaceId) -> SpaceConfigResult<Option<SpaceConfig>> {
        Ok(self.repository.get(space_id).await?)
    }

    /// Sets or clears the notification channel for a space.
    ///
    /// A supplied channel is validated against the space's channel set
    /// before any write; `None` clears the setting. The record is
    /// inserted on first write and merge-updated afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceConfigError::InvalidChannelReference`] when the
    /// channel is not a text channel of the space, or the wrapped
    /// gateway/repository error on infrastructure failure.
    pub async fn set_notification_channel(
        &self,
        space_id: &SpaceId,
        channel_id: Option<ChannelId>,
    ) -> SpaceConfigResult<SpaceConfig> {
        if let Some(channel) = channel_id
            && !self.gateway.is_text_channel(space_id, channel).await?
        {
            return Err(SpaceConfigError::InvalidChannelReference(channel));
        }

        let existing = self.repository.get(space_id).await?;
        let config = match existing {
            None => self.insert_fresh(space_id, channel_id).await?,
            Some(_) => {
                let patch = SpaceConfigPatch::new().with_notification_channel(
                    channel_id.map_or(FieldUpdate::Clear, FieldUpdate::Set),
                );
                match self.repository.update(space_id, patch).await? {
                    Some(updated) => updated,
                    // Record vanished between read and update; fall back
                    // to a fresh insert to keep create-or-update intact.
                    None => self.insert_fresh(space_id, channel_id).await?,
                }
            }
        };

        info!(
            space_id = %space_id,
            channel_id = channel_id.map(ChannelId::value),
            "notification channel configured"
        );
        Ok(config)
    }

    /// Builds and stores a first-time configuration record.
    async fn insert_fresh(
        &self,
        space_id: &SpaceId,
        channel_id: Option<ChannelId>,
    ) -> SpaceConfigResult<SpaceConfig> {
        let mut config = SpaceConfig::new(space_id.clone());
        if let Some(channel) = channel_id {
            config = config.with_notification_channel(channel);
        }
        self.repository.insert(&config).await?;
        Ok(config)
    }
}
