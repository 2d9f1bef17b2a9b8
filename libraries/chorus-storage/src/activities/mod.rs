//! Playlist song activity log

use chorus_core::{error::Result, types::*};
use chrono::{SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};

/// Append an entry stamped with the current time
pub async fn record(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_title: &str,
    username: &str,
    action: ActivityAction,
) -> Result<ActivityId> {
    let id = ActivityId::generate();
    let time = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    sqlx::query(
        "INSERT INTO playlist_song_activities (id, playlist_id, song_title, username, action, time)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(song_title)
    .bind(username)
    .bind(action.as_str())
    .bind(&time)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn get_by_playlist(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<PlaylistActivity>> {
    let rows = sqlx::query(
        "SELECT song_title, username, action, time
         FROM playlist_song_activities
         WHERE playlist_id = ?
         ORDER BY time, rowid",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let action_str: String = row.get("action");
            let action = ActivityAction::parse(&action_str).ok_or_else(|| {
                chorus_core::ChorusError::Database(format!("Invalid activity action: {}", action_str))
            })?;

            Ok(PlaylistActivity {
                username: row.get("username"),
                title: row.get("song_title"),
                action,
                time: row.get("time"),
            })
        })
        .collect()
}
