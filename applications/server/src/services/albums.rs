/// Album service - album CRUD and the cached like aggregate
use chorus_cache::{AggregateCache, Cached};
use chorus_core::{
    error::Result,
    types::{AlbumDetail, AlbumId, LikeId, NewAlbum, UpdateAlbum, UserId},
    CacheKey, ChorusError,
};
use chorus_storage::{albums, likes, songs, Database};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AlbumService {
    db: Arc<Database>,
    cache: AggregateCache,
}

impl AlbumService {
    pub fn new(db: Arc<Database>, cache: AggregateCache) -> Self {
        Self { db, cache }
    }

    pub async fn add_album(&self, album: &NewAlbum) -> Result<AlbumId> {
        albums::create(self.db.pool(), album).await
    }

    /// Album with the summaries of its songs
    pub async fn get_album(&self, id: &AlbumId) -> Result<AlbumDetail> {
        let album = albums::get_by_id(self.db.pool(), id)
            .await?
            .ok_or_else(|| ChorusError::not_found("Album", id.as_str()))?;
        let songs = songs::get_by_album(self.db.pool(), id).await?;

        Ok(AlbumDetail { album, songs })
    }

    pub async fn edit_album(&self, id: &AlbumId, album: &UpdateAlbum) -> Result<()> {
        if !albums::update(self.db.pool(), id, album).await? {
            return Err(ChorusError::not_found("Album", id.as_str()));
        }
        Ok(())
    }

    /// Delete the album; its likes go with it, so the like count is dropped too
    pub async fn delete_album(&self, id: &AlbumId) -> Result<()> {
        if !albums::delete(self.db.pool(), id).await? {
            return Err(ChorusError::not_found("Album", id.as_str()));
        }
        self.cache.invalidate(&CacheKey::AlbumLikes(id.clone())).await
    }

    pub async fn set_cover(&self, id: &AlbumId, cover_url: &str) -> Result<()> {
        if !albums::set_cover(self.db.pool(), id, cover_url).await? {
            return Err(ChorusError::not_found("Album", id.as_str()));
        }
        Ok(())
    }

    /// Record that `user_id` likes `album_id`
    ///
    /// The duplicate check runs before the insert; the unique index on
    /// `(user_id, album_id)` catches the race where two requests pass it.
    pub async fn register_like(&self, album_id: &AlbumId, user_id: &UserId) -> Result<LikeId> {
        let pool = self.db.pool();

        if !albums::exists(pool, album_id).await? {
            return Err(ChorusError::not_found("Album", album_id.as_str()));
        }

        if likes::exists(pool, album_id, user_id).await? {
            return Err(ChorusError::conflict(likes::ALREADY_LIKED));
        }

        let like_id = likes::insert(pool, album_id, user_id).await?;
        tracing::info!(album = %album_id, user = %user_id, "Album liked");

        self.cache
            .invalidate(&CacheKey::AlbumLikes(album_id.clone()))
            .await?;

        Ok(like_id)
    }

    pub async fn delete_like(&self, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
        if !likes::delete(self.db.pool(), album_id, user_id).await? {
            return Err(ChorusError::not_found("Like", album_id.as_str()));
        }
        tracing::info!(album = %album_id, user = %user_id, "Album unliked");

        self.cache
            .invalidate(&CacheKey::AlbumLikes(album_id.clone()))
            .await
    }

    /// Number of likes on the album; an album nobody likes is `NotFound`
    pub async fn album_likes(&self, album_id: &AlbumId) -> Result<Cached<u64>> {
        let pool = self.db.pool();
        let key = CacheKey::AlbumLikes(album_id.clone());

        self.cache
            .get_or_compute(&key, || async move {
                let count = likes::count(pool, album_id).await?;
                Ok((count > 0).then_some(count))
            })
            .await
    }
}
