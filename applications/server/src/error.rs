/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chorus_core::ChorusError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Domain(#[from] ChorusError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl ServerError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::Domain(err) => match err {
                ChorusError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                ChorusError::Conflict(msg) | ChorusError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, msg.clone())
                }
                ChorusError::PermissionDenied(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                _ => {
                    tracing::error!("Domain error: {:?}", err);
                    internal()
                }
            },
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServerError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            ServerError::Jwt(e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal()
            }
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                internal()
            }
            ServerError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                internal()
            }
            ServerError::Bcrypt(e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Client faults are "fail", server faults "error"
        let kind = if status.is_server_error() {
            "error"
        } else {
            "fail"
        };

        let body = Json(json!({
            "status": kind,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServerError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_domain_errors_map_to_client_statuses() {
        assert_eq!(
            status_of(ChorusError::not_found("Album", "album-1").into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ChorusError::conflict("You have already liked this album").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ChorusError::permission_denied("nope").into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ChorusError::invalid_input("bad").into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_faults_map_to_internal_error() {
        assert_eq!(
            status_of(ChorusError::Cache("down".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ChorusError::invariant("no id").into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_boundary_errors() {
        assert_eq!(
            status_of(ServerError::Auth("missing".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ServerError::PayloadTooLarge("big".to_string())),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
