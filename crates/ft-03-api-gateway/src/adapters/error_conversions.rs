//! Error conversions from transport rejection types.
//!
//! These conversions involve axum extractor types and belong in the
//! adapters layer.

use crate::domain::ApiError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(format!("Malformed request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(format!("Invalid query string: {}", rejection.body_text()))
    }
}
