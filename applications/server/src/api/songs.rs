/// Songs API routes
use super::{response, validation};
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use chorus_core::types::{NewSong, SongFilter, SongId};
use serde_json::json;

fn validate(song: &NewSong) -> Result<()> {
    validation::require_non_empty("title", &song.title)?;
    validation::require_non_empty("genre", &song.genre)?;
    validation::require_non_empty("performer", &song.performer)?;
    validation::require_year(song.year)
}

/// POST /api/songs
pub async fn add_song(
    State(app_state): State<AppState>,
    Json(req): Json<NewSong>,
) -> Result<Response> {
    validate(&req)?;
    let song_id = app_state.songs.add_song(&req).await?;
    Ok(response::created(json!({ "songId": song_id })))
}

/// GET /api/songs?title=&performer=
pub async fn list_songs(
    State(app_state): State<AppState>,
    Query(filter): Query<SongFilter>,
) -> Result<Json<serde_json::Value>> {
    let songs = app_state.songs.list_songs(&filter).await?;
    Ok(response::data(json!({ "songs": songs })))
}

/// GET /api/songs/:id
pub async fn get_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    let song = app_state.songs.get_song(&SongId::new(id)).await?;
    Ok(response::data(json!({ "song": song })))
}

/// PUT /api/songs/:id
pub async fn edit_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(req): Json<NewSong>,
) -> Result<Json<serde_json::Value>> {
    validate(&req)?;
    app_state.songs.edit_song(&SongId::new(id), &req).await?;
    Ok(response::message("Song updated"))
}

/// DELETE /api/songs/:id
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    app_state.songs.delete_song(&SongId::new(id)).await?;
    Ok(response::message("Song deleted"))
}
