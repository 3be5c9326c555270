//! Vote cascade doubles.
//!
//! The production cascade is wired in the runtime over the vote store.

use crate::domain::{LifecycleError, LifecycleResult};
use crate::ports::outbound::VoteCascade;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::RequestId;
use std::sync::atomic::{AtomicBool, Ordering};

/// Records cascaded request ids for inspection in tests.
#[derive(Default)]
pub struct RecordingVoteCascade {
    cascaded: RwLock<Vec<RequestId>>,
    failing: AtomicBool,
}

impl RecordingVoteCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cascaded(&self) -> Vec<RequestId> {
        self.cascaded.read().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl VoteCascade for RecordingVoteCascade {
    async fn delete_votes_for(&self, request_id: RequestId) -> LifecycleResult<usize> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LifecycleError::Cascade {
                reason: "vote store unavailable".to_string(),
            });
        }
        self.cascaded.write().push(request_id);
        Ok(0)
    }
}
