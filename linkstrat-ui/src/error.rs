//! Error types for linkstrat-ui

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Missing or invalid service configuration (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generation service failure (502)
    #[error("Upstream error: {0}")]
    Upstream(String, Option<String>),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// linkstrat-common error
    #[error(transparent)]
    Common(#[from] linkstrat_common::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            ApiError::Upstream(msg, details) => (StatusCode::BAD_GATEWAY, msg, details),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            ApiError::Common(err) => match err {
                linkstrat_common::Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
                linkstrat_common::Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg, None),
                other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string(), None),
            },
        };

        let body = match details {
            Some(details) => json!({ "error": message, "details": details }),
            None => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}
