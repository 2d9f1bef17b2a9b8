use chorus_core::{error::Result, types::*, ChorusError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn map_album(row: &SqliteRow) -> Album {
    Album {
        id: row.get("id"),
        name: row.get("name"),
        year: row.get("year"),
        cover_url: row.get("cover"),
    }
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query("SELECT id, name, year, cover FROM albums ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(map_album).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: &AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT id, name, year, cover FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(map_album))
}

pub async fn exists(pool: &SqlitePool, id: &AlbumId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn create(pool: &SqlitePool, album: &NewAlbum) -> Result<AlbumId> {
    let id = AlbumId::generate();

    let row = sqlx::query(
        "INSERT INTO albums (id, name, year, cover)
         VALUES (?, ?, ?, ?)
         RETURNING id",
    )
    .bind(&id)
    .bind(&album.name)
    .bind(album.year)
    .bind(&album.cover)
    .fetch_optional(pool)
    .await?;

    row.map(|row| row.get("id"))
        .ok_or_else(|| ChorusError::invariant("Album could not be added"))
}

/// Returns `false` when no album has this id
pub async fn update(pool: &SqlitePool, id: &AlbumId, album: &UpdateAlbum) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE albums SET name = ?, year = ?, updated_at = datetime('now') WHERE id = ?",
    )
    .bind(&album.name)
    .bind(album.year)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Returns `false` when no album has this id
pub async fn set_cover(pool: &SqlitePool, id: &AlbumId, cover_url: &str) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE albums SET cover = ?, updated_at = datetime('now') WHERE id = ?",
    )
    .bind(cover_url)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes the album; its likes go with it, its songs are detached.
pub async fn delete(pool: &SqlitePool, id: &AlbumId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
