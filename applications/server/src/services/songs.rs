/// Song service
use chorus_core::{
    error::Result,
    types::{NewSong, Song, SongFilter, SongId, SongSummary},
    ChorusError,
};
use chorus_storage::{songs, Database};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SongService {
    db: Arc<Database>,
}

impl SongService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn add_song(&self, song: &NewSong) -> Result<SongId> {
        songs::create(self.db.pool(), song).await
    }

    /// Songs whose title and performer contain the given fragments
    pub async fn list_songs(&self, filter: &SongFilter) -> Result<Vec<SongSummary>> {
        songs::search(self.db.pool(), filter).await
    }

    pub async fn get_song(&self, id: &SongId) -> Result<Song> {
        songs::get_by_id(self.db.pool(), id)
            .await?
            .ok_or_else(|| ChorusError::not_found("Song", id.as_str()))
    }

    pub async fn edit_song(&self, id: &SongId, song: &NewSong) -> Result<()> {
        if !songs::update(self.db.pool(), id, song).await? {
            return Err(ChorusError::not_found("Song", id.as_str()));
        }
        Ok(())
    }

    pub async fn delete_song(&self, id: &SongId) -> Result<()> {
        if !songs::delete(self.db.pool(), id).await? {
            return Err(ChorusError::not_found("Song", id.as_str()));
        }
        Ok(())
    }
}
