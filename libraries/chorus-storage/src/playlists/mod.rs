use crate::conflict_on_unique;
use chorus_core::{error::Result, types::*, ChorusError};
use sqlx::{Row, SqlitePool};

/// Playlists owned by or shared with a user, with the owner's username
pub async fn get_user_playlists(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT p.id, p.name, u.username
        FROM playlists p
        INNER JOIN users u ON u.id = p.owner
        LEFT JOIN collaborations c ON c.playlist_id = p.id
        WHERE p.owner = ?1 OR c.user_id = ?1
        ORDER BY p.created_at, p.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistSummary {
            id: row.get("id"),
            name: row.get("name"),
            username: row.get("username"),
        })
        .collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name, owner FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Playlist {
        id: row.get("id"),
        name: row.get("name"),
        owner: row.get("owner"),
    }))
}

/// Get playlist with the owner's username and all songs
pub async fn get_with_songs(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<PlaylistDetail>> {
    let row = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        INNER JOIN users u ON u.id = p.owner
        WHERE p.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let song_rows = sqlx::query(
        r#"
        SELECT s.id, s.title, s.performer
        FROM playlist_songs ps
        INNER JOIN songs s ON s.id = ps.song_id
        WHERE ps.playlist_id = ?
        ORDER BY ps.added_at, ps.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let songs = song_rows
        .into_iter()
        .map(|row| SongSummary {
            id: row.get("id"),
            title: row.get("title"),
            performer: row.get("performer"),
        })
        .collect();

    Ok(Some(PlaylistDetail {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
        songs,
    }))
}

pub async fn create(pool: &SqlitePool, playlist: &NewPlaylist) -> Result<PlaylistId> {
    let id = PlaylistId::generate();

    let row = sqlx::query(
        "INSERT INTO playlists (id, name, owner)
         VALUES (?, ?, ?)
         RETURNING id",
    )
    .bind(&id)
    .bind(&playlist.name)
    .bind(&playlist.owner)
    .fetch_optional(pool)
    .await?;

    row.map(|row| row.get("id"))
        .ok_or_else(|| ChorusError::invariant("Playlist could not be added"))
}

/// Delete playlist, returning its owner when a row was removed
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<UserId>> {
    let row = sqlx::query("DELETE FROM playlists WHERE id = ? RETURNING owner")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get("owner")))
}

/// Add song to playlist; a song already present is a `Conflict`
pub async fn add_song(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<PlaylistSongId> {
    let id = PlaylistSongId::generate();

    let row = sqlx::query(
        "INSERT INTO playlist_songs (id, playlist_id, song_id)
         VALUES (?, ?, ?)
         RETURNING id",
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(song_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "Song is already in the playlist"))?;

    row.map(|row| row.get("id"))
        .ok_or_else(|| ChorusError::invariant("Song could not be added to the playlist"))
}

/// Returns `false` when the song was not in the playlist
pub async fn remove_song(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
