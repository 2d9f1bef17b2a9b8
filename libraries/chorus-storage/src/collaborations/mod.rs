use crate::conflict_on_unique;
use chorus_core::{error::Result, types::*, ChorusError};
use sqlx::{Row, SqlitePool};

pub async fn add(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<CollaborationId> {
    let id = CollaborationId::generate();

    let row = sqlx::query(
        "INSERT INTO collaborations (id, playlist_id, user_id)
         VALUES (?, ?, ?)
         RETURNING id",
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "User is already a collaborator"))?;

    row.map(|row| row.get("id"))
        .ok_or_else(|| ChorusError::invariant("Collaboration could not be added"))
}

/// Returns `false` when no such collaboration existed
pub async fn delete(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn exists(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Users collaborating on a playlist
pub async fn get_collaborators(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<UserId>> {
    let rows = sqlx::query("SELECT user_id FROM collaborations WHERE playlist_id = ?")
        .bind(playlist_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|row| row.get("user_id")).collect())
}
