/// Playlist service - access resolution, songs, activities and the cached listing
use super::CollaborationService;
use chorus_cache::{AggregateCache, Cached};
use chorus_core::{
    error::Result,
    types::{
        ActivityAction, NewPlaylist, Playlist, PlaylistActivities, PlaylistDetail, PlaylistId,
        PlaylistSongId, PlaylistSummary, SongId, UserId,
    },
    CacheKey, ChorusError,
};
use chorus_storage::{activities, collaborations, playlists, songs, users, Database};
use std::sync::Arc;

const NOT_ENTITLED: &str = "You are not entitled to access this resource";

#[derive(Debug, Clone)]
pub struct PlaylistService {
    db: Arc<Database>,
    cache: AggregateCache,
    collaborations: Arc<CollaborationService>,
}

impl PlaylistService {
    pub fn new(
        db: Arc<Database>,
        cache: AggregateCache,
        collaborations: Arc<CollaborationService>,
    ) -> Self {
        Self {
            db,
            cache,
            collaborations,
        }
    }

    /// Succeeds only for the playlist's owner
    pub async fn verify_ownership(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<Playlist> {
        let playlist = playlists::get_by_id(self.db.pool(), playlist_id)
            .await?
            .ok_or_else(|| ChorusError::not_found("Playlist", playlist_id.as_str()))?;

        if playlist.owner != *user_id {
            return Err(ChorusError::permission_denied(NOT_ENTITLED));
        }

        Ok(playlist)
    }

    /// Succeeds for the owner or a collaborator
    ///
    /// A missing playlist is reported as such. A non-owner who is not a
    /// collaborator gets the ownership error, never the collaboration one.
    pub async fn verify_access(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        let ownership_err = match self.verify_ownership(playlist_id, user_id).await {
            Ok(_) => return Ok(()),
            Err(err @ ChorusError::PermissionDenied(_)) => err,
            Err(err) => return Err(err),
        };

        match self
            .collaborations
            .verify_collaborator(playlist_id, user_id)
            .await
        {
            Ok(()) => Ok(()),
            Err(collab_err) => {
                tracing::debug!(
                    playlist = %playlist_id,
                    user = %user_id,
                    error = %collab_err,
                    "Not a collaborator"
                );
                Err(ownership_err)
            }
        }
    }

    pub async fn add_playlist(&self, name: &str, owner: &UserId) -> Result<PlaylistId> {
        let id = playlists::create(
            self.db.pool(),
            &NewPlaylist {
                name: name.to_string(),
                owner: owner.clone(),
            },
        )
        .await?;

        self.cache
            .invalidate(&CacheKey::UserPlaylists(owner.clone()))
            .await?;

        Ok(id)
    }

    /// Playlists the user owns or collaborates on
    pub async fn list_playlists(&self, user_id: &UserId) -> Result<Cached<Vec<PlaylistSummary>>> {
        let pool = self.db.pool();
        let key = CacheKey::UserPlaylists(user_id.clone());

        self.cache
            .get_or_compute(&key, || async move {
                playlists::get_user_playlists(pool, user_id).await.map(Some)
            })
            .await
    }

    /// Delete the playlist and drop the listing of everyone who could see it
    pub async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()> {
        let pool = self.db.pool();

        // Collaborations cascade with the playlist, so read them first
        let collaborators = collaborations::get_collaborators(pool, playlist_id).await?;

        let owner = playlists::delete(pool, playlist_id)
            .await?
            .ok_or_else(|| ChorusError::not_found("Playlist", playlist_id.as_str()))?;
        tracing::info!(playlist = %playlist_id, "Playlist deleted");

        let keys: Vec<CacheKey> = std::iter::once(owner)
            .chain(collaborators)
            .map(CacheKey::UserPlaylists)
            .collect();
        self.cache.invalidate_many(&keys).await
    }

    /// Add a song, recording who added it
    pub async fn add_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
    ) -> Result<PlaylistSongId> {
        let pool = self.db.pool();

        let song = songs::get_by_id(pool, song_id)
            .await?
            .ok_or_else(|| ChorusError::not_found("Song", song_id.as_str()))?;
        let username = self.username(user_id).await?;

        let id = playlists::add_song(pool, playlist_id, song_id).await?;
        activities::record(pool, playlist_id, &song.title, &username, ActivityAction::Add).await?;

        Ok(id)
    }

    pub async fn get_playlist_songs(&self, playlist_id: &PlaylistId) -> Result<PlaylistDetail> {
        playlists::get_with_songs(self.db.pool(), playlist_id)
            .await?
            .ok_or_else(|| ChorusError::not_found("Playlist", playlist_id.as_str()))
    }

    /// Remove a song, recording who removed it
    pub async fn remove_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
    ) -> Result<()> {
        let pool = self.db.pool();

        let song = songs::get_by_id(pool, song_id)
            .await?
            .ok_or_else(|| ChorusError::not_found("Song", song_id.as_str()))?;
        let username = self.username(user_id).await?;

        if !playlists::remove_song(pool, playlist_id, song_id).await? {
            return Err(ChorusError::invalid_input("Song is not in the playlist"));
        }
        activities::record(pool, playlist_id, &song.title, &username, ActivityAction::Delete)
            .await?;

        Ok(())
    }

    /// Song additions and removals, oldest first
    pub async fn activities(&self, playlist_id: &PlaylistId) -> Result<PlaylistActivities> {
        let activities = activities::get_by_playlist(self.db.pool(), playlist_id).await?;
        if activities.is_empty() {
            return Err(ChorusError::not_found("Playlist activities", playlist_id.as_str()));
        }

        Ok(PlaylistActivities {
            playlist_id: playlist_id.clone(),
            activities,
        })
    }

    async fn username(&self, user_id: &UserId) -> Result<String> {
        users::get_by_id(self.db.pool(), user_id)
            .await?
            .map(|user| user.username)
            .ok_or_else(|| ChorusError::not_found("User", user_id.as_str()))
    }
}
