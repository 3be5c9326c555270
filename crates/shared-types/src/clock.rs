//! Time source abstraction.
//!
//! Abstracted to allow testing with deterministic time.

use crate::entities::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of the current time in milliseconds.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Manually driven clock for tests.
#[derive(Debug, Default)]
pub struct MockTimeSource {
    time: AtomicU64,
}

impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}
