//! Voting error types.

use super::entities::VoteType;
use shared_types::{Denied, KVStoreError, RequestId, TrackerError};
use thiserror::Error;

/// Voting subsystem errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotingError {
    /// Vote type missing or not one of `upvote`/`like`.
    #[error("Vote type must be upvote or like")]
    InvalidVoteType { given: Option<String> },

    /// Target request does not exist.
    #[error("Request not found")]
    RequestNotFound { request_id: RequestId },

    /// Uniqueness guard rejected a second vote of the same type.
    #[error("You have already {} this request", .vote_type.past_tense())]
    AlreadyVoted { vote_type: VoteType },

    /// Retraction of a vote that was never cast.
    #[error("Vote not found")]
    VoteNotFound,

    /// Role may not perform the action.
    #[error(transparent)]
    Forbidden(#[from] Denied),

    /// Backend failure.
    #[error("Vote store error: {0}")]
    Store(#[from] KVStoreError),

    /// Request lookup failed in the owning subsystem.
    #[error("Request lookup failed: {reason}")]
    RequestLookup { reason: String },

    /// A store call did not complete within the configured deadline.
    #[error("Store timed out during {operation}")]
    Timeout { operation: &'static str },
}

impl VotingError {
    /// Backend failures, as opposed to domain outcomes.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            VotingError::Store(_) | VotingError::RequestLookup { .. } | VotingError::Timeout { .. }
        )
    }
}

/// Result type for voting operations
pub type VotingResult<T> = Result<T, VotingError>;

impl From<VotingError> for TrackerError {
    fn from(err: VotingError) -> Self {
        let message = err.to_string();
        match err {
            VotingError::InvalidVoteType { .. } => TrackerError::Validation(message),
            VotingError::RequestNotFound { .. } | VotingError::VoteNotFound => {
                TrackerError::NotFound(message)
            }
            VotingError::AlreadyVoted { .. } => TrackerError::Conflict(message),
            VotingError::Forbidden(_) => TrackerError::Forbidden(message),
            VotingError::Store(_)
            | VotingError::RequestLookup { .. }
            | VotingError::Timeout { .. } => TrackerError::Infrastructure(message),
        }
    }
}
