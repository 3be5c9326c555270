//! Request Lifecycle error types.

use shared_types::{Denied, KVStoreError, RequestId, TrackerError};
use thiserror::Error;

/// Request Lifecycle subsystem errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Target status missing or outside the recognized set.
    #[error("Invalid status")]
    InvalidStatus { given: Option<String> },

    /// Required submission field is blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Request not found")]
    RequestNotFound { request_id: RequestId },

    #[error(transparent)]
    Forbidden(#[from] Denied),

    #[error("Request store error: {0}")]
    Store(#[from] KVStoreError),

    /// Vote removal failed.
    #[error("Vote cascade failed: {reason}")]
    Cascade { reason: String },

    /// Id allocation kept colliding with concurrent submissions.
    #[error("Could not allocate a request id after {attempts} attempts")]
    IdAllocation { attempts: u32 },

    /// The row kept changing under concurrent transitions.
    #[error("Request changed concurrently; gave up after {attempts} attempts")]
    Contention { attempts: u32 },

    #[error("Store timed out during {operation}")]
    Timeout { operation: &'static str },
}

impl LifecycleError {
    /// Backend failures, as opposed to domain outcomes.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            LifecycleError::Store(_)
                | LifecycleError::Cascade { .. }
                | LifecycleError::IdAllocation { .. }
                | LifecycleError::Contention { .. }
                | LifecycleError::Timeout { .. }
        )
    }
}

/// Result type for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;

impl From<LifecycleError> for TrackerError {
    fn from(err: LifecycleError) -> Self {
        let message = err.to_string();
        match err {
            LifecycleError::InvalidStatus { .. } | LifecycleError::MissingField { .. } => {
                TrackerError::Validation(message)
            }
            LifecycleError::RequestNotFound { .. } => TrackerError::NotFound(message),
            LifecycleError::Forbidden(_) => TrackerError::Forbidden(message),
            LifecycleError::Store(_)
            | LifecycleError::Cascade { .. }
            | LifecycleError::IdAllocation { .. }
            | LifecycleError::Contention { .. }
            | LifecycleError::Timeout { .. } => TrackerError::Infrastructure(message),
        }
    }
}
