//! Request deletion cascading into the Voting store.

use async_trait::async_trait;
use ft_01_request_lifecycle::{LifecycleError, LifecycleResult, VoteCascade};
use ft_02_voting::VoteStore;
use shared_types::RequestId;
use std::sync::Arc;

/// `VoteCascade` backed by a `VoteStore`.
pub struct VoteStoreCascade<V: VoteStore> {
    votes: Arc<V>,
}

impl<V: VoteStore> VoteStoreCascade<V> {
    pub fn new(votes: Arc<V>) -> Self {
        Self { votes }
    }
}

#[async_trait]
impl<V: VoteStore> VoteCascade for VoteStoreCascade<V> {
    async fn delete_votes_for(&self, request_id: RequestId) -> LifecycleResult<usize> {
        self.votes
            .delete_by_request(request_id)
            .await
            .map_err(|e| LifecycleError::Cascade {
                reason: e.to_string(),
            })
    }
}
