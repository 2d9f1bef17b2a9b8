/// Albums API routes
use super::{multipart, response, validation};
use crate::{error::Result, middleware::AuthenticatedUser, services::ImageKind, state::AppState};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    Json,
};
use chorus_core::types::{AlbumId, NewAlbum, UpdateAlbum};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct AlbumPayload {
    pub name: String,
    pub year: i32,
}

impl AlbumPayload {
    fn validate(&self) -> Result<()> {
        validation::require_non_empty("name", &self.name)?;
        validation::require_year(self.year)
    }
}

/// POST /api/albums
pub async fn add_album(
    State(app_state): State<AppState>,
    Json(req): Json<AlbumPayload>,
) -> Result<Response> {
    req.validate()?;

    let album_id = app_state
        .albums
        .add_album(&NewAlbum {
            name: req.name,
            year: req.year,
            cover: None,
        })
        .await?;

    Ok(response::created(json!({ "albumId": album_id })))
}

/// GET /api/albums/:id
pub async fn get_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    let album = app_state.albums.get_album(&AlbumId::new(id)).await?;
    Ok(response::data(json!({ "album": album })))
}

/// PUT /api/albums/:id
pub async fn edit_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(req): Json<AlbumPayload>,
) -> Result<Json<serde_json::Value>> {
    req.validate()?;

    app_state
        .albums
        .edit_album(
            &AlbumId::new(id),
            &UpdateAlbum {
                name: req.name,
                year: req.year,
            },
        )
        .await?;

    Ok(response::message("Album updated"))
}

/// DELETE /api/albums/:id
pub async fn delete_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    app_state.albums.delete_album(&AlbumId::new(id)).await?;
    Ok(response::message("Album deleted"))
}

/// POST /api/albums/:id/covers
/// Upload cover art (multipart field `cover`)
pub async fn upload_cover(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let album_id = AlbumId::new(id);
    let file = multipart::read_file_field(&headers, body, "cover").await?;

    // Validate before touching the disk so a bad upload leaves nothing behind
    app_state
        .file_storage
        .validate_image(&file.content_type, file.data.len())?;
    app_state.albums.get_album(&album_id).await?;

    let filename = app_state
        .file_storage
        .store_image(ImageKind::Cover, &file.content_type, &file.data)
        .await?;
    let cover_url = app_state.file_url("albums/covers", &filename);

    app_state.albums.set_cover(&album_id, &cover_url).await?;
    tracing::info!(album = %album_id, %cover_url, "Album cover uploaded");

    Ok(response::created_message("Cover uploaded"))
}

/// POST /api/albums/:id/likes
pub async fn like_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Response> {
    app_state
        .albums
        .register_like(&AlbumId::new(id), auth.user_id())
        .await?;

    Ok(response::created_message("Album liked"))
}

/// DELETE /api/albums/:id/likes
pub async fn unlike_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    app_state
        .albums
        .delete_like(&AlbumId::new(id), auth.user_id())
        .await?;

    Ok(response::message("Album unliked"))
}

/// GET /api/albums/:id/likes
pub async fn album_likes(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Response> {
    let likes = app_state.albums.album_likes(&AlbumId::new(id)).await?;
    Ok(response::with_source(likes.source, json!({ "likes": likes.value })))
}
