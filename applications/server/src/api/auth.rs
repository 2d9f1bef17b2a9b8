/// Authentication API routes
use super::response;
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, response::Response, Json};
use chorus_storage::authentications;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response> {
    let user_id = app_state
        .users
        .verify_credential(&req.username, &req.password)
        .await?;

    let tokens = app_state.auth_service.issue_tokens(&user_id)?;
    authentications::add(app_state.db.pool(), &tokens.refresh_token).await?;
    tracing::info!(user = %user_id, "User logged in");

    Ok(response::created(tokens))
}

/// POST /api/auth/refresh
/// Exchange a stored refresh token for a new access token
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<serde_json::Value>> {
    if !authentications::exists(app_state.db.pool(), &req.refresh_token).await? {
        return Err(ServerError::BadRequest("Invalid refresh token".to_string()));
    }

    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)
        .map_err(|_| ServerError::BadRequest("Invalid refresh token".to_string()))?;
    let access_token = app_state.auth_service.create_access_token(&user_id)?;

    Ok(response::data(json!({ "accessToken": access_token })))
}

/// DELETE /api/auth/logout
/// Revoke a refresh token
pub async fn logout(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<serde_json::Value>> {
    if !authentications::delete(app_state.db.pool(), &req.refresh_token).await? {
        return Err(ServerError::BadRequest("Invalid refresh token".to_string()));
    }

    Ok(response::message("Refresh token deleted"))
}
