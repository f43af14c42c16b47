//! Per-space administrative configuration record.

use super::{ChannelId, FieldUpdate, SpaceId};
use serde::{Deserialize, Serialize};

/// Administrative configuration, exactly one record per space.
///
/// Created on the first configuration write; later writes update the
/// record in place. No history, no deletion path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceConfig {
    space_id: SpaceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification_channel_id: Option<ChannelId>,
}

impl SpaceConfig {
    /// Creates a configuration record with no notification channel set.
    #[must_use]
    pub const fn new(space_id: SpaceId) -> Self {
        Self {
            space_id,
            notification_channel_id: None,
        }
    }

    /// Sets the notification channel.
    #[must_use]
    pub const fn with_notification_channel(mut self, channel_id: ChannelId) -> Self {
        self.notification_channel_id = Some(channel_id);
        self
    }

    /// Returns the owning-space identifier.
    #[must_use]
    pub const fn space_id(&self) -> &SpaceId {
        &self.space_id
    }

    /// Returns the notification channel, if one is configured.
    #[must_use]
    pub const fn notification_channel_id(&self) -> Option<ChannelId> {
        self.notification_channel_id
    }

    /// Merges a patch into the record.
    pub fn apply_patch(&mut self, patch: SpaceConfigPatch) {
        self.notification_channel_id = patch
            .notification_channel_id
            .apply(self.notification_channel_id);
    }
}

/// Partial update for a space configuration record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceConfigPatch {
    /// Notification-channel update.
    pub notification_channel_id: FieldUpdate<ChannelId>,
}

impl SpaceConfigPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the notification-channel update.
    #[must_use]
    pub const fn with_notification_channel(mut self, update: FieldUpdate<ChannelId>) -> Self {
        self.notification_channel_id = update;
        self
    }
}
