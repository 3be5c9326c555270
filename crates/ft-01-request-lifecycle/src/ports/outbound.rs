//! Driven Ports (SPI - Outbound Dependencies)
//!
//! - `RequestStore`: request rows and their status
//! - `ActivityLog`: read side of the status audit trail
//! - `VoteCascade`: vote removal owned by the Voting subsystem

use crate::domain::{
    ActivityEntry, LifecycleError, LifecycleResult, Request, RequestFilter,
};
use async_trait::async_trait;
use shared_types::RequestId;

/// Request persistence.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Next candidate id. Uniqueness is settled by `insert`, not here.
    async fn next_id(&self) -> LifecycleResult<RequestId>;

    /// Inserts a new request when its id has never been claimed.
    ///
    /// Returns `false` (nothing written) when the id is taken, including by
    /// a request that was since deleted.
    async fn insert(&self, request: &Request) -> LifecycleResult<bool>;

    async fn find(&self, request_id: RequestId) -> LifecycleResult<Option<Request>>;

    /// Lookup-or-fail.
    async fn get(&self, request_id: RequestId) -> LifecycleResult<Request> {
        self.find(request_id)
            .await?
            .ok_or(LifecycleError::RequestNotFound { request_id })
    }

    /// Requests matching the filter, ordered by id.
    async fn list(&self, filter: RequestFilter) -> LifecycleResult<Vec<Request>>;

    /// Persists the updated request and its activity entry as one write,
    /// provided the stored row still equals `previous`.
    ///
    /// Returns `false` (nothing written) when the row was deleted or
    /// changed since it was read.
    async fn commit_transition(
        &self,
        previous: &Request,
        updated: &Request,
        entry: &ActivityEntry,
    ) -> LifecycleResult<bool>;

    /// Removes the request row; returns whether it existed.
    async fn delete(&self, request_id: RequestId) -> LifecycleResult<bool>;
}

/// Append-only audit trail reader.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Entries for the request, oldest first.
    async fn history(&self, request_id: RequestId) -> LifecycleResult<Vec<ActivityEntry>>;
}

/// Removes every vote attached to a request.
#[async_trait]
pub trait VoteCascade: Send + Sync {
    async fn delete_votes_for(&self, request_id: RequestId) -> LifecycleResult<usize>;
}
