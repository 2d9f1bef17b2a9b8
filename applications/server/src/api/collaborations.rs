/// Collaborations API routes
use super::{response, validation};
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, response::Response, Json};
use chorus_core::types::{PlaylistId, UserId};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    pub playlist_id: String,
    pub user_id: String,
}

impl CollaborationRequest {
    fn ids(self) -> Result<(PlaylistId, UserId)> {
        validation::require_non_empty("playlistId", &self.playlist_id)?;
        validation::require_non_empty("userId", &self.user_id)?;
        Ok((PlaylistId::new(self.playlist_id), UserId::new(self.user_id)))
    }
}

/// POST /api/collaborations
/// Owner only
pub async fn add_collaboration(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CollaborationRequest>,
) -> Result<Response> {
    let (playlist_id, user_id) = req.ids()?;

    app_state
        .playlists
        .verify_ownership(&playlist_id, auth.user_id())
        .await?;
    let collaboration_id = app_state
        .collaborations
        .add(&playlist_id, &user_id)
        .await?;

    Ok(response::created(json!({ "collaborationId": collaboration_id })))
}

/// DELETE /api/collaborations
/// Owner only
pub async fn delete_collaboration(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CollaborationRequest>,
) -> Result<Json<serde_json::Value>> {
    let (playlist_id, user_id) = req.ids()?;

    app_state
        .playlists
        .verify_ownership(&playlist_id, auth.user_id())
        .await?;
    app_state
        .collaborations
        .remove(&playlist_id, &user_id)
        .await?;

    Ok(response::message("Collaboration removed"))
}
