//! Driving Ports (API - Inbound)
//!
//! ## Authorization
//!
//! | Method | Action | Roles |
//! |--------|--------|-------|
//! | `submit_request` | none (authentication only) | any |
//! | `get_request` / `list_requests` / `get_history` | none | any |
//! | `change_status` | `changeStatus` | admin |
//! | `delete_request` | `deleteRequest` | admin |

use crate::domain::{ActivityEntry, LifecycleResult, NewRequest, Request, RequestFilter};
use async_trait::async_trait;
use shared_types::{Principal, RequestId};

/// Primary Request Lifecycle API.
#[async_trait]
pub trait RequestLifecycleApi: Send + Sync {
    /// Creates a request in the `pending` state.
    ///
    /// # Errors
    /// - `MissingField`: blank title or business problem
    async fn submit_request(&self, actor: &Principal, draft: NewRequest)
        -> LifecycleResult<Request>;

    async fn get_request(&self, actor: &Principal, request_id: RequestId)
        -> LifecycleResult<Request>;

    async fn list_requests(
        &self,
        actor: &Principal,
        filter: RequestFilter,
    ) -> LifecycleResult<Vec<Request>>;

    /// Status audit trail, oldest first.
    ///
    /// # Errors
    /// - `RequestNotFound`: request does not exist
    async fn get_history(
        &self,
        actor: &Principal,
        request_id: RequestId,
    ) -> LifecycleResult<Vec<ActivityEntry>>;

    /// Moves a request to `status` and records the transition.
    ///
    /// Checks run in a fixed order: status validity, then role, then
    /// existence.
    ///
    /// # Errors
    /// - `InvalidStatus`: target missing or unrecognized
    /// - `Forbidden`: actor is not an admin
    /// - `RequestNotFound`: request does not exist
    async fn change_status(
        &self,
        actor: &Principal,
        request_id: RequestId,
        status: Option<&str>,
    ) -> LifecycleResult<Request>;

    /// Deletes a request after cascading its votes. The activity log is kept.
    ///
    /// # Errors
    /// - `Forbidden`: actor is not an admin
    /// - `RequestNotFound`: request does not exist
    async fn delete_request(&self, actor: &Principal, request_id: RequestId)
        -> LifecycleResult<()>;
}
