//! Key-value backed `RequestStore` and `ActivityLog`.
//!
//! ## Key Layout
//!
//! ```text
//! ids/{request_id:020}                                         ->  (empty)
//! req/{request_id:020}                                         ->  bincode(Request)
//! log/{request_id:020}/{timestamp:020}/{seq:020}/{entry_id}    ->  bincode(ActivityEntry)
//! ```
//!
//! `ids/` markers are written with the request and never removed. They
//! claim an id for good, so a deleted request's id (and the history kept
//! under it) is never handed to a later submission, even after a restart.
//!
//! Log keys sort by time, then by local append order, so a prefix scan
//! returns a request's history oldest first.

use crate::domain::{ActivityEntry, LifecycleError, LifecycleResult, Request, RequestFilter};
use crate::ports::outbound::{ActivityLog, RequestStore};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{BatchOperation, KVStoreError, KeyValueStore, RequestId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

const REQUEST_PREFIX: &[u8] = b"req/";
const ID_PREFIX: &[u8] = b"ids/";

fn id_key(request_id: RequestId) -> Vec<u8> {
    format!("ids/{:020}", request_id).into_bytes()
}

fn parse_id(key: &[u8], prefix: &[u8]) -> Result<RequestId, KVStoreError> {
    std::str::from_utf8(&key[prefix.len()..])
        .ok()
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| KVStoreError::Corrupted {
            key: String::from_utf8_lossy(key).into_owned(),
            message: "malformed request id".to_string(),
        })
}

fn request_key(request_id: RequestId) -> Vec<u8> {
    format!("req/{:020}", request_id).into_bytes()
}

fn log_prefix(request_id: RequestId) -> Vec<u8> {
    format!("log/{:020}/", request_id).into_bytes()
}

fn log_key(entry: &ActivityEntry, seq: u64) -> Vec<u8> {
    format!(
        "log/{:020}/{:020}/{:020}/{}",
        entry.request_id, entry.timestamp, seq, entry.id
    )
    .into_bytes()
}

fn encode<T: Serialize>(value: &T) -> LifecycleResult<Vec<u8>> {
    bincode::serialize(value).map_err(|e| {
        LifecycleError::Store(KVStoreError::IOError {
            message: format!("failed to encode record: {}", e),
        })
    })
}

fn decode<T: DeserializeOwned>(key: &[u8], bytes: &[u8]) -> Result<T, KVStoreError> {
    bincode::deserialize(bytes).map_err(|e| KVStoreError::Corrupted {
        key: String::from_utf8_lossy(key).into_owned(),
        message: e.to_string(),
    })
}

/// Request rows and activity log over one `KeyValueStore`.
pub struct KvRequestStore {
    kv: Arc<dyn KeyValueStore>,
    next_id: AtomicU64,
    log_seq: AtomicU64,
}

impl KvRequestStore {
    /// Opens the store, seeding id allocation past the highest id ever
    /// claimed, deleted requests included.
    pub fn open(kv: Arc<dyn KeyValueStore>) -> Result<Self, KVStoreError> {
        let mut highest: RequestId = 0;
        for prefix in [ID_PREFIX, REQUEST_PREFIX] {
            if let Some((key, _)) = kv.prefix_scan(prefix)?.last() {
                highest = highest.max(parse_id(key, prefix)?);
            }
        }
        debug!(highest, "[ft-01] request store opened");

        Ok(Self {
            kv,
            next_id: AtomicU64::new(highest + 1),
            log_seq: AtomicU64::new(0),
        })
    }
}

#[async_trait]
impl RequestStore for KvRequestStore {
    async fn next_id(&self) -> LifecycleResult<RequestId> {
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn insert(&self, request: &Request) -> LifecycleResult<bool> {
        let marker = id_key(request.id);
        let inserted = self.kv.batch_write_if(
            &marker,
            None,
            vec![
                BatchOperation::put(marker.clone(), Vec::new()),
                BatchOperation::put(request_key(request.id), encode(request)?),
            ],
        )?;
        Ok(inserted)
    }

    async fn find(&self, request_id: RequestId) -> LifecycleResult<Option<Request>> {
        let key = request_key(request_id);
        match self.kv.get(&key)? {
            Some(bytes) => Ok(Some(decode(&key, &bytes)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: RequestFilter) -> LifecycleResult<Vec<Request>> {
        let mut requests = Vec::new();
        for (key, value) in self.kv.prefix_scan(REQUEST_PREFIX)? {
            let request: Request = decode(&key, &value)?;
            if filter.matches(&request) {
                requests.push(request);
            }
        }
        Ok(requests)
    }

    async fn commit_transition(
        &self,
        previous: &Request,
        updated: &Request,
        entry: &ActivityEntry,
    ) -> LifecycleResult<bool> {
        let key = request_key(updated.id);
        let seq = self.log_seq.fetch_add(1, Ordering::SeqCst);
        let committed = self.kv.batch_write_if(
            &key,
            Some(encode(previous)?.as_slice()),
            vec![
                BatchOperation::put(key.clone(), encode(updated)?),
                BatchOperation::put(log_key(entry, seq), encode(entry)?),
            ],
        )?;
        Ok(committed)
    }

    async fn delete(&self, request_id: RequestId) -> LifecycleResult<bool> {
        let key = request_key(request_id);
        loop {
            let current = match self.kv.get(&key)? {
                Some(bytes) => bytes,
                None => return Ok(false),
            };
            if self.kv.batch_write_if(
                &key,
                Some(current.as_slice()),
                vec![BatchOperation::delete(key.clone())],
            )? {
                return Ok(true);
            }
            // A status commit replaced the row in between; reread it.
        }
    }
}

#[async_trait]
impl ActivityLog for KvRequestStore {
    async fn history(&self, request_id: RequestId) -> LifecycleResult<Vec<ActivityEntry>> {
        let entries = self
            .kv
            .prefix_scan(&log_prefix(request_id))?
            .iter()
            .map(|(k, v)| decode(k, v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
