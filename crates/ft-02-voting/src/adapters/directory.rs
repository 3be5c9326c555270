//! Request Directory Adapters
//!
//! The production directory lives in the runtime, where both subsystems
//! are wired together. This module carries the in-memory double used by
//! tests and by embedders that run voting on its own.

use crate::domain::{VotingError, VotingResult};
use crate::ports::outbound::RequestDirectory;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::RequestId;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory directory of known request ids.
#[derive(Default)]
pub struct StaticRequestDirectory {
    known: RwLock<HashSet<RequestId>>,
    failing: AtomicBool,
}

impl StaticRequestDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory pre-populated with the given ids.
    pub fn with_requests(ids: impl IntoIterator<Item = RequestId>) -> Self {
        let directory = Self::default();
        directory.known.write().extend(ids);
        directory
    }

    pub fn insert(&self, request_id: RequestId) {
        self.known.write().insert(request_id);
    }

    pub fn remove(&self, request_id: RequestId) {
        self.known.write().remove(&request_id);
    }

    /// Makes every lookup fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl RequestDirectory for StaticRequestDirectory {
    async fn request_exists(&self, request_id: RequestId) -> VotingResult<bool> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(VotingError::RequestLookup {
                reason: "directory unavailable".to_string(),
            });
        }
        Ok(self.known.read().contains(&request_id))
    }
}
