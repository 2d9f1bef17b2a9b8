use chorus_core::{error::Result, types::*, ChorusError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn map_song(row: &SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        title: row.get("title"),
        year: row.get("year"),
        genre: row.get("genre"),
        performer: row.get("performer"),
        duration: row.get("duration"),
        album_id: row.get("album_id"),
    }
}

fn map_summary(row: &SqliteRow) -> SongSummary {
    SongSummary {
        id: row.get("id"),
        title: row.get("title"),
        performer: row.get("performer"),
    }
}

/// List songs, optionally narrowed by case-insensitive title/performer substrings
pub async fn search(pool: &SqlitePool, filter: &SongFilter) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, performer
        FROM songs
        WHERE (?1 IS NULL OR title LIKE '%' || ?1 || '%')
          AND (?2 IS NULL OR performer LIKE '%' || ?2 || '%')
        ORDER BY title
        "#,
    )
    .bind(filter.title.as_deref())
    .bind(filter.performer.as_deref())
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_summary).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, title, year, genre, performer, duration, album_id
         FROM songs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(map_song))
}

pub async fn get_by_album(pool: &SqlitePool, album_id: &AlbumId) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query(
        "SELECT id, title, performer FROM songs WHERE album_id = ? ORDER BY title",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_summary).collect())
}

pub async fn create(pool: &SqlitePool, song: &NewSong) -> Result<SongId> {
    let id = SongId::generate();

    let row = sqlx::query(
        "INSERT INTO songs (id, title, year, genre, performer, duration, album_id)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(&id)
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.genre)
    .bind(&song.performer)
    .bind(song.duration)
    .bind(&song.album_id)
    .fetch_optional(pool)
    .await?;

    row.map(|row| row.get("id"))
        .ok_or_else(|| ChorusError::invariant("Song could not be added"))
}

/// Returns `false` when no song has this id
pub async fn update(pool: &SqlitePool, id: &SongId, song: &NewSong) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE songs
         SET title = ?, year = ?, genre = ?, performer = ?, duration = ?, album_id = ?,
             updated_at = datetime('now')
         WHERE id = ?",
    )
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.genre)
    .bind(&song.performer)
    .bind(song.duration)
    .bind(&song.album_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: &SongId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
