/// Collaboration service - shared playlist membership
use chorus_cache::AggregateCache;
use chorus_core::{
    error::Result,
    types::{CollaborationId, PlaylistId, UserId},
    CacheKey, ChorusError,
};
use chorus_storage::{collaborations, users, Database};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CollaborationService {
    db: Arc<Database>,
    cache: AggregateCache,
}

impl CollaborationService {
    pub fn new(db: Arc<Database>, cache: AggregateCache) -> Self {
        Self { db, cache }
    }

    /// Share `playlist_id` with `user_id`
    ///
    /// The playlist's ownership must already be verified by the caller.
    pub async fn add(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<CollaborationId> {
        let pool = self.db.pool();

        if !users::exists(pool, user_id).await? {
            return Err(ChorusError::not_found("User", user_id.as_str()));
        }

        if collaborations::exists(pool, playlist_id, user_id).await? {
            return Err(ChorusError::conflict("User is already a collaborator"));
        }

        let id = collaborations::add(pool, playlist_id, user_id).await?;
        tracing::info!(playlist = %playlist_id, user = %user_id, "Collaborator added");

        self.cache
            .invalidate(&CacheKey::UserPlaylists(user_id.clone()))
            .await?;

        Ok(id)
    }

    pub async fn remove(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        if !collaborations::delete(self.db.pool(), playlist_id, user_id).await? {
            return Err(ChorusError::not_found("Collaboration", playlist_id.as_str()));
        }
        tracing::info!(playlist = %playlist_id, user = %user_id, "Collaborator removed");

        self.cache
            .invalidate(&CacheKey::UserPlaylists(user_id.clone()))
            .await
    }

    pub async fn verify_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        if !collaborations::exists(self.db.pool(), playlist_id, user_id).await? {
            return Err(ChorusError::invalid_input(
                "Collaboration could not be verified",
            ));
        }
        Ok(())
    }
}
