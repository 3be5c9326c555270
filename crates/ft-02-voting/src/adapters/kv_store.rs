//! Key-value backed `VoteStore`.
//!
//! ## Key Layout
//!
//! ```text
//! vote/{request_id:020}/{user_id:020}/{vote_type}  ->  bincode(Vote)
//! ```
//!
//! The triple is the key itself, so the uniqueness constraint is the
//! store's `put_if_absent`. Zero-padded ids keep a request's rows (and a
//! user's rows inside it) contiguous for prefix scans.

use crate::domain::{Vote, VoteAggregate, VoteType, VotingError, VotingResult};
use crate::ports::outbound::VoteStore;
use async_trait::async_trait;
use shared_types::{
    BatchOperation, KVStoreError, KeyValueStore, RequestId, TimeSource, UserId,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

fn request_prefix(request_id: RequestId) -> Vec<u8> {
    format!("vote/{:020}/", request_id).into_bytes()
}

fn user_prefix(request_id: RequestId, user_id: UserId) -> Vec<u8> {
    format!("vote/{:020}/{:020}/", request_id, user_id).into_bytes()
}

fn vote_key(request_id: RequestId, user_id: UserId, vote_type: VoteType) -> Vec<u8> {
    format!("vote/{:020}/{:020}/{}", request_id, user_id, vote_type).into_bytes()
}

fn encode(vote: &Vote) -> VotingResult<Vec<u8>> {
    bincode::serialize(vote).map_err(|e| {
        VotingError::Store(KVStoreError::IOError {
            message: format!("failed to encode vote: {}", e),
        })
    })
}

fn decode(key: &[u8], bytes: &[u8]) -> VotingResult<Vote> {
    bincode::deserialize(bytes).map_err(|e| {
        VotingError::Store(KVStoreError::Corrupted {
            key: String::from_utf8_lossy(key).into_owned(),
            message: e.to_string(),
        })
    })
}

/// Vote store over any `KeyValueStore` backend.
pub struct KvVoteStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn TimeSource>,
}

impl KvVoteStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn TimeSource>) -> Self {
        Self { kv, clock }
    }

    fn votes_for(&self, request_id: RequestId) -> VotingResult<Vec<Vote>> {
        self.kv
            .prefix_scan(&request_prefix(request_id))?
            .iter()
            .map(|(k, v)| decode(k, v))
            .collect()
    }

    fn voters_of(&self, request_id: RequestId, vote_type: VoteType) -> VotingResult<Vec<UserId>> {
        let mut votes: Vec<Vote> = self
            .votes_for(request_id)?
            .into_iter()
            .filter(|v| v.vote_type == vote_type)
            .collect();
        votes.sort_by_key(|v| (v.created_at, v.user_id));
        Ok(votes.into_iter().map(|v| v.user_id).collect())
    }
}

#[async_trait]
impl VoteStore for KvVoteStore {
    async fn find_by_request_and_user(
        &self,
        request_id: RequestId,
        user_id: UserId,
        vote_type: VoteType,
    ) -> VotingResult<Option<Vote>> {
        let key = vote_key(request_id, user_id, vote_type);
        match self.kv.get(&key)? {
            Some(bytes) => Ok(Some(decode(&key, &bytes)?)),
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        request_id: RequestId,
        user_id: UserId,
        vote_type: VoteType,
    ) -> VotingResult<Vote> {
        let vote = Vote::new(request_id, user_id, vote_type, self.clock.now());
        let key = vote_key(request_id, user_id, vote_type);

        if !self.kv.put_if_absent(&key, &encode(&vote)?)? {
            debug!(request_id, user_id, %vote_type, "uniqueness guard rejected vote");
            return Err(VotingError::AlreadyVoted { vote_type });
        }
        Ok(vote)
    }

    async fn delete(
        &self,
        request_id: RequestId,
        user_id: UserId,
        vote_type: VoteType,
    ) -> VotingResult<()> {
        self.kv.delete(&vote_key(request_id, user_id, vote_type))?;
        Ok(())
    }

    async fn get_counts(&self, request_id: RequestId) -> VotingResult<VoteAggregate> {
        Ok(VoteAggregate::from_votes(&self.votes_for(request_id)?))
    }

    async fn get_user_vote_types(
        &self,
        request_id: RequestId,
        user_id: UserId,
    ) -> VotingResult<BTreeSet<VoteType>> {
        self.kv
            .prefix_scan(&user_prefix(request_id, user_id))?
            .iter()
            .map(|(k, v)| decode(k, v).map(|vote| vote.vote_type))
            .collect()
    }

    async fn get_upvoters(&self, request_id: RequestId) -> VotingResult<Vec<UserId>> {
        self.voters_of(request_id, VoteType::Upvote)
    }

    async fn get_likers(&self, request_id: RequestId) -> VotingResult<Vec<UserId>> {
        self.voters_of(request_id, VoteType::Like)
    }

    async fn delete_by_request(&self, request_id: RequestId) -> VotingResult<usize> {
        let keys: Vec<_> = self
            .kv
            .prefix_scan(&request_prefix(request_id))?
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        let removed = keys.len();

        if removed > 0 {
            self.kv
                .atomic_batch_write(keys.into_iter().map(BatchOperation::delete).collect())?;
        }
        Ok(removed)
    }
}
