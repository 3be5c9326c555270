//! Driven Ports (SPI - Outbound Dependencies)
//!
//! `VoteStore` owns vote rows; `RequestDirectory` answers whether a request
//! exists in the Request Lifecycle subsystem.

use crate::domain::{Vote, VoteAggregate, VoteType, VotingResult};
use async_trait::async_trait;
use shared_types::{RequestId, UserId};
use std::collections::BTreeSet;

/// Vote persistence.
///
/// ## Uniqueness (INVARIANT-1)
///
/// `create` is the authoritative guard: it MUST fail with
/// `VotingError::AlreadyVoted` when the triple already exists, evaluated
/// atomically with the insert. Callers never pre-check with
/// `find_by_request_and_user` before creating.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Looks up a single vote row.
    async fn find_by_request_and_user(
        &self,
        request_id: RequestId,
        user_id: UserId,
        vote_type: VoteType,
    ) -> VotingResult<Option<Vote>>;

    /// Persists a new vote row.
    async fn create(
        &self,
        request_id: RequestId,
        user_id: UserId,
        vote_type: VoteType,
    ) -> VotingResult<Vote>;

    /// Removes a vote row. Absence is reported by the caller, not here.
    async fn delete(
        &self,
        request_id: RequestId,
        user_id: UserId,
        vote_type: VoteType,
    ) -> VotingResult<()>;

    /// Per-type counts computed from the live rows.
    async fn get_counts(&self, request_id: RequestId) -> VotingResult<VoteAggregate>;

    /// Vote types the user currently holds on the request.
    async fn get_user_vote_types(
        &self,
        request_id: RequestId,
        user_id: UserId,
    ) -> VotingResult<BTreeSet<VoteType>>;

    /// Upvoting users, ordered by cast time then user id.
    async fn get_upvoters(&self, request_id: RequestId) -> VotingResult<Vec<UserId>>;

    /// Liking users, ordered by cast time then user id.
    async fn get_likers(&self, request_id: RequestId) -> VotingResult<Vec<UserId>>;

    /// Removes every vote on the request; returns the number removed.
    async fn delete_by_request(&self, request_id: RequestId) -> VotingResult<usize>;
}

/// Existence check against the Request Lifecycle subsystem.
#[async_trait]
pub trait RequestDirectory: Send + Sync {
    async fn request_exists(&self, request_id: RequestId) -> VotingResult<bool>;
}
