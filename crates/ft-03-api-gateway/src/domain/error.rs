//! API Gateway error types.
//!
//! `ApiError` is the only place an error kind becomes an HTTP status:
//!
//! | Kind | Status |
//! |------|--------|
//! | validation | 400 |
//! | not_found | 404 |
//! | forbidden | 403 |
//! | conflict | 400 |
//! | unauthenticated | 401 |
//! | infrastructure | 503 |
//!
//! Body: `{"error": <kind>, "message": <text>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ft_01_request_lifecycle::LifecycleError;
use ft_02_voting::VotingError;
use serde::Serialize;
use shared_types::{ErrorKind, TrackerError};
use std::fmt;

/// Maps an error kind to its HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        // Duplicate votes are reported as a bad request
        ErrorKind::Conflict => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Infrastructure => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Classified failure on its way out of the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.kind)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind.as_str(),
            message: &self.message,
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        Self::new(err.kind(), err.message())
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        TrackerError::from(err).into()
    }
}

impl From<VotingError> for ApiError {
    fn from(err: VotingError) -> Self {
        TrackerError::from(err).into()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (startup and serving, not per-request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("server bind error: {0}")]
    Bind(String),

    #[error("server error: {0}")]
    Server(String),
}
