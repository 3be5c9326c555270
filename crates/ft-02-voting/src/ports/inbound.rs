//! Driving Ports (API - Inbound)
//!
//! ## Authorization
//!
//! | Method | Action | Roles |
//! |--------|--------|-------|
//! | `add_vote` | `vote` | any |
//! | `remove_vote` | `vote` | any |
//! | `get_votes` | none (authentication only) | any |
//! | `get_voters` | `viewAnalytics` | admin |

use crate::domain::{VoteOutcome, VoteSummary, Voters, VotingResult};
use async_trait::async_trait;
use shared_types::{Principal, RequestId};

/// Primary Voting API.
///
/// `vote_type` is the raw transport value; validation of presence and
/// spelling happens inside the service so every caller gets the same
/// failure.
#[async_trait]
pub trait VotingApi: Send + Sync {
    /// Casts a vote of the given type.
    ///
    /// # Errors
    /// - `InvalidVoteType`: type missing or unrecognized
    /// - `RequestNotFound`: request does not exist
    /// - `AlreadyVoted`: the caller already holds this vote type
    async fn add_vote(
        &self,
        actor: &Principal,
        request_id: RequestId,
        vote_type: Option<&str>,
    ) -> VotingResult<VoteOutcome>;

    /// Retracts a vote of the given type.
    ///
    /// # Errors
    /// - `InvalidVoteType`: type missing or unrecognized
    /// - `VoteNotFound`: the caller does not hold this vote type
    async fn remove_vote(
        &self,
        actor: &Principal,
        request_id: RequestId,
        vote_type: Option<&str>,
    ) -> VotingResult<VoteOutcome>;

    /// Current counts and the caller's own votes.
    async fn get_votes(&self, actor: &Principal, request_id: RequestId)
        -> VotingResult<VoteSummary>;

    /// Ordered voter lists for reporting.
    async fn get_voters(&self, actor: &Principal, request_id: RequestId) -> VotingResult<Voters>;
}
