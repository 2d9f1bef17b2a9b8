/// Image upload API routes
use super::{multipart, response};
use crate::{error::Result, services::ImageKind, state::AppState};
use axum::{body::Bytes, extract::State, http::HeaderMap, response::Response};
use serde_json::json;

/// POST /api/uploads/images
/// Store an image (multipart field `data`) and return where it is served
pub async fn upload_image(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let file = multipart::read_file_field(&headers, body, "data").await?;

    let filename = app_state
        .file_storage
        .store_image(ImageKind::Image, &file.content_type, &file.data)
        .await?;

    Ok(response::created(json!({
        "fileLocation": app_state.file_url("uploads/images", &filename),
    })))
}
