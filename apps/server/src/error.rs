//! Server error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use record_store::StoreError;
use schema::ValidationError;
use serde_json::json;

/// Error codes surfaced in the JSON error envelope.
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const RESOURCE_NOT_FOUND: &str = "resource_not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payload validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Resource not found (updates targeting an absent id).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound(format!("{entity} {id}")),
            other => Self::Store(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, msg.clone())
            }
            ServerError::Validation(e) => {
                (StatusCode::BAD_REQUEST, error_codes::VALIDATION_FAILED, e.to_string())
            }
            ServerError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, error_codes::RESOURCE_NOT_FOUND, msg.clone())
            }
            ServerError::Store(e) => {
                tracing::error!(error = %e, "Storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR, e.to_string())
            }
        };

        let mut body = json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });
        if let ServerError::Validation(e) = &self {
            body["error"]["fields"] = json!(e.errors);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
