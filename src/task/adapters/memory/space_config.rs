//! In-memory space-configuration repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{SpaceConfig, SpaceConfigPatch, SpaceId},
    ports::{SpaceConfigRepository, SpaceConfigRepositoryError, SpaceConfigRepositoryResult},
};

/// Thread-safe in-memory space-configuration repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpaceConfigRepository {
    state: Arc<RwLock<HashMap<SpaceId, SpaceConfig>>>,
}

impl InMemorySpaceConfigRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Maps a poisoned lock to a store-unavailable error.
fn lock_poisoned<G>(err: std::sync::PoisonError<G>) -> SpaceConfigRepositoryError {
    SpaceConfigRepositoryError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SpaceConfigRepository for InMemorySpaceConfigRepository {
    async fn get(&self, space_id: &SpaceId) -> SpaceConfigRepositoryResult<Option<SpaceConfig>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(space_id).cloned())
    }

    async fn insert(&self, config: &SpaceConfig) -> SpaceConfigRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.contains_key(config.space_id()) {
            return Err(SpaceConfigRepositoryError::Duplicate(
                config.space_id().clone(),
            ));
        }
        state.insert(config.space_id().clone(), config.clone());
        Ok(())
    }

    async fn update(
        &self,
        space_id: &SpaceId,
        patch: SpaceConfigPatch,
    ) -> SpaceConfigRepositoryResult<Option<SpaceConfig>> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let Some(config) = state.get_mut(space_id) else {
            return Ok(None);
        };
        config.apply_patch(patch);
        Ok(Some(config.clone()))
    }
}
