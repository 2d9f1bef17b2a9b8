/// Users API routes
use super::{response, validation};
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use chorus_core::types::UserId;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub fullname: String,
}

/// POST /api/users
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response> {
    validation::require_non_empty("username", &req.username)?;
    validation::require_non_empty("password", &req.password)?;
    validation::require_non_empty("fullname", &req.fullname)?;

    let user_id = app_state
        .users
        .register(&req.username, &req.password, &req.fullname)
        .await?;

    Ok(response::created(json!({ "userId": user_id })))
}

/// GET /api/users/:id
pub async fn get_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    let user = app_state.users.get_user(&UserId::new(id)).await?;
    Ok(response::data(json!({ "user": user })))
}
