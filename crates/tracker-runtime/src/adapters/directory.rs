//! Voting's view of request existence, answered by the Request Lifecycle store.

use async_trait::async_trait;
use ft_01_request_lifecycle::RequestStore;
use ft_02_voting::{RequestDirectory, VotingError, VotingResult};
use shared_types::RequestId;
use std::sync::Arc;

/// `RequestDirectory` backed by a `RequestStore`.
pub struct LifecycleRequestDirectory<S: RequestStore> {
    store: Arc<S>,
}

impl<S: RequestStore> LifecycleRequestDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: RequestStore> RequestDirectory for LifecycleRequestDirectory<S> {
    async fn request_exists(&self, request_id: RequestId) -> VotingResult<bool> {
        self.store
            .find(request_id)
            .await
            .map(|request| request.is_some())
            .map_err(|e| VotingError::RequestLookup {
                reason: e.to_string(),
            })
    }
}
