//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chorus_cache::{AggregateCache, MemoryCache};
use chorus_core::{Cache, UserId};
use chorus_server::{
    create_router,
    services::{AuthService, FileStorage},
    state::AppState,
};
use chorus_storage::Database;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const PUBLIC_URL: &str = "http://localhost:5000";
pub const MAX_IMAGE_BYTES: usize = 1024;

/// A fully wired application over a temporary database and upload directory
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_cache_backend(Arc::new(MemoryCache::new(1024))).await
    }

    pub async fn with_cache_backend(backend: Arc<dyn Cache>) -> Self {
        let temp_dir = TempDir::new().unwrap();

        let db_path = temp_dir.path().join("chorus-test.db");
        let db = Database::connect(&format!("sqlite://{}", db_path.display()))
            .await
            .unwrap();

        let file_storage = FileStorage::new(temp_dir.path().join("uploads"), MAX_IMAGE_BYTES);
        file_storage.initialize().await.unwrap();

        let auth_service = Arc::new(AuthService::new(
            "test-secret-key".to_string(),
            1, // 1 hour access
            1, // 1 day refresh
        ));

        let state = AppState::new(
            Arc::new(db),
            AggregateCache::new(backend, Duration::from_secs(1800)),
            auth_service,
            Arc::new(file_storage),
            PUBLIC_URL,
        );

        Self {
            router: create_router(state.clone()),
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Register a user and return its id with an access token
    pub async fn user(&self, username: &str) -> (UserId, String) {
        let user_id = self
            .state
            .users
            .register(username, "secret-password", &format!("{} Fullname", username))
            .await
            .unwrap();
        let token = self
            .state
            .auth_service
            .create_access_token(&user_id)
            .unwrap();
        (user_id, token)
    }

    /// Send a request and decode the JSON body
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if body_bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestResponse {
    pub fn data_source(&self) -> Option<&str> {
        self.headers
            .get("x-data-source")
            .and_then(|v| v.to_str().ok())
    }
}

/// JSON request, optionally authenticated
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Body-less request, optionally authenticated
pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Single-file `multipart/form-data` request
pub fn multipart_request(uri: &str, field: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let boundary = "chorus-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"upload.bin\"\r\n",
            field
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Test fixtures
pub mod fixtures {
    use chorus_core::types::{NewAlbum, NewSong};

    pub fn album(name: &str) -> NewAlbum {
        NewAlbum {
            name: name.to_string(),
            year: 2008,
            cover: None,
        }
    }

    pub fn song(title: &str) -> NewSong {
        NewSong {
            title: title.to_string(),
            year: 2008,
            genre: "Indie".to_string(),
            performer: "Coldplay".to_string(),
            duration: Some(240),
            album_id: None,
        }
    }
}
