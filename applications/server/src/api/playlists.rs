/// Playlists API routes
use super::{response, validation};
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use chorus_core::types::{PlaylistId, SongId};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSongRequest {
    pub song_id: String,
}

/// POST /api/playlists
pub async fn add_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<Response> {
    validation::require_non_empty("name", &req.name)?;

    let playlist_id = app_state
        .playlists
        .add_playlist(&req.name, auth.user_id())
        .await?;

    Ok(response::created(json!({ "playlistId": playlist_id })))
}

/// GET /api/playlists
/// Playlists owned by or shared with the authenticated user
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Response> {
    let playlists = app_state.playlists.list_playlists(auth.user_id()).await?;
    Ok(response::with_source(
        playlists.source,
        json!({ "playlists": playlists.value }),
    ))
}

/// DELETE /api/playlists/:id
/// Owner only
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_ownership(&playlist_id, auth.user_id())
        .await?;
    app_state.playlists.delete_playlist(&playlist_id).await?;

    Ok(response::message("Playlist deleted"))
}

/// POST /api/playlists/:id/songs
pub async fn add_playlist_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<PlaylistSongRequest>,
) -> Result<Response> {
    validation::require_non_empty("songId", &req.song_id)?;
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_access(&playlist_id, auth.user_id())
        .await?;
    app_state
        .playlists
        .add_song(&playlist_id, &SongId::new(req.song_id), auth.user_id())
        .await?;

    Ok(response::created_message("Song added to playlist"))
}

/// GET /api/playlists/:id/songs
pub async fn get_playlist_songs(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_access(&playlist_id, auth.user_id())
        .await?;
    let playlist = app_state.playlists.get_playlist_songs(&playlist_id).await?;

    Ok(response::data(json!({ "playlist": playlist })))
}

/// DELETE /api/playlists/:id/songs
pub async fn remove_playlist_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<PlaylistSongRequest>,
) -> Result<Json<serde_json::Value>> {
    validation::require_non_empty("songId", &req.song_id)?;
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_access(&playlist_id, auth.user_id())
        .await?;
    app_state
        .playlists
        .remove_song(&playlist_id, &SongId::new(req.song_id), auth.user_id())
        .await?;

    Ok(response::message("Song removed from playlist"))
}

/// GET /api/playlists/:id/activities
pub async fn get_activities(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_access(&playlist_id, auth.user_id())
        .await?;
    let activities = app_state.playlists.activities(&playlist_id).await?;

    Ok(response::data(activities))
}
