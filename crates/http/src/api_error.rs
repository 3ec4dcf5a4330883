//! Typed API error for HTTP handlers.
//!
//! Converts service errors into HTTP responses with a JSON body
//! `{"error": "message"}`.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use recipe_cache_service::ServiceError;
use recipe_cache_storage::StorageError;

#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid query or path input.
    BadRequest(String),
    /// 404 Not Found: nothing matched locally or upstream.
    NotFound(String),
    /// 500: the upstream provider failed. Details logged, not exposed.
    UpstreamUnavailable(String),
    /// 500: unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::UpstreamUnavailable(detail) => {
                tracing::warn!(error = %detail, "upstream unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, "upstream recipe service unavailable".to_owned())
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::UpstreamUnavailable(e) => Self::UpstreamUnavailable(e.to_string()),
            ServiceError::Storage(StorageError::NotFound { entity, id }) => {
                Self::NotFound(format!("{entity} '{id}' not found"))
            },
            ServiceError::Storage(e) => Self::Internal(e.into()),
        }
    }
}

/// Malformed query strings get the same JSON error body as other bad input.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
