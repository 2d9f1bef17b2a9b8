/// Response envelopes shared by the API routes
use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chorus_cache::CacheSource;
use serde::Serialize;
use serde_json::json;

/// Header telling clients whether an aggregate was served from cache or store
pub const DATA_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-data-source");

/// `{"status":"success","data":…}`
pub fn data<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "data": data,
    }))
}

/// `{"status":"success","message":…}`
pub fn message(message: &str) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "message": message,
    }))
}

/// 201 with a data envelope
pub fn created<T: Serialize>(body: T) -> Response {
    (StatusCode::CREATED, data(body)).into_response()
}

/// 201 with a message envelope
pub fn created_message(text: &str) -> Response {
    (StatusCode::CREATED, message(text)).into_response()
}

/// Data envelope tagged with the `X-Data-Source` header
pub fn with_source<T: Serialize>(source: CacheSource, body: T) -> Response {
    (
        [(DATA_SOURCE_HEADER, HeaderValue::from_static(source.as_str()))],
        data(body),
    )
        .into_response()
}
