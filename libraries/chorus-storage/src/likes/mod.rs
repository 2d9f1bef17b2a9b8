//! Album likes
//!
//! The `(user_id, album_id)` unique index backs up the application-level
//! duplicate check; a violation surfaces as `Conflict` like the pre-check does.

use crate::conflict_on_unique;
use chorus_core::{error::Result, types::*, ChorusError};
use sqlx::{Row, SqlitePool};

pub const ALREADY_LIKED: &str = "You have already liked this album";

pub async fn exists(pool: &SqlitePool, album_id: &AlbumId, user_id: &UserId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM user_album_likes WHERE album_id = ? AND user_id = ?")
        .bind(album_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn insert(pool: &SqlitePool, album_id: &AlbumId, user_id: &UserId) -> Result<LikeId> {
    let id = LikeId::generate();

    let row = sqlx::query(
        "INSERT INTO user_album_likes (id, user_id, album_id)
         VALUES (?, ?, ?)
         RETURNING id",
    )
    .bind(&id)
    .bind(user_id)
    .bind(album_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| conflict_on_unique(e, ALREADY_LIKED))?;

    row.map(|row| row.get("id"))
        .ok_or_else(|| ChorusError::invariant("Album could not be liked"))
}

/// Returns `false` when the user had not liked the album
pub async fn delete(pool: &SqlitePool, album_id: &AlbumId, user_id: &UserId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM user_album_likes WHERE album_id = ? AND user_id = ?")
        .bind(album_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &SqlitePool, album_id: &AlbumId) -> Result<u64> {
    let row = sqlx::query("SELECT COUNT(*) AS likes FROM user_album_likes WHERE album_id = ?")
        .bind(album_id)
        .fetch_one(pool)
        .await?;

    let likes: i64 = row.get("likes");
    Ok(likes.max(0) as u64)
}
