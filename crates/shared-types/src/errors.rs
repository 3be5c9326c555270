//! # Error Taxonomy
//!
//! Classified failures consumed uniformly by the transport boundary.
//! Every subsystem error converts into `TrackerError`; the gateway maps
//! `ErrorKind` to a status code in exactly one place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// Referenced entity is absent.
    NotFound,
    /// Authenticated but the role is not allowed.
    Forbidden,
    /// Uniqueness violation (duplicate vote).
    Conflict,
    /// No or invalid principal.
    Unauthenticated,
    /// Store timeout or unavailability.
    Infrastructure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::Infrastructure => "infrastructure",
        }
    }
}

/// Typed failure carrying a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Infrastructure(String),
}

impl TrackerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::Validation(_) => ErrorKind::Validation,
            TrackerError::NotFound(_) => ErrorKind::NotFound,
            TrackerError::Forbidden(_) => ErrorKind::Forbidden,
            TrackerError::Conflict(_) => ErrorKind::Conflict,
            TrackerError::Unauthenticated(_) => ErrorKind::Unauthenticated,
            TrackerError::Infrastructure(_) => ErrorKind::Infrastructure,
        }
    }

    /// Only infrastructure failures may be retried by the caller.
    ///
    /// A duplicate vote is terminal for that call; retrying a timed-out
    /// vote is safe because the store reports a conflict if the first
    /// attempt persisted.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Infrastructure
    }

    pub fn message(&self) -> &str {
        match self {
            TrackerError::Validation(m)
            | TrackerError::NotFound(m)
            | TrackerError::Forbidden(m)
            | TrackerError::Conflict(m)
            | TrackerError::Unauthenticated(m)
            | TrackerError::Infrastructure(m) => m,
        }
    }
}

impl From<crate::policy::Denied> for TrackerError {
    fn from(denied: crate::policy::Denied) -> Self {
        TrackerError::Forbidden(denied.to_string())
    }
}

/// Result alias used at the classified boundary.
pub type TrackerResult<T> = Result<T, TrackerError>;
