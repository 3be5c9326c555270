//! # Key-Value Storage Port
//!
//! Abstract persistence shared by the request and vote stores.
//!
//! Production: `RocksDbStore` (tracker-runtime/adapters/storage/rocksdb_adapter.rs)
//! Testing: `InMemoryKVStore` (below)
//!
//! ## Atomic Constrained Insert
//!
//! `put_if_absent` is the only primitive used to create rows whose key must
//! be unique (votes, request ids). Implementations MUST evaluate the
//! existence check and the write as one atomic step; callers never
//! check-then-put.
//!
//! `batch_write_if` extends the same guarantee to updates: a batch lands
//! only while a guard key still holds the value the caller last read.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Storage backend failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {message}")]
    IOError { message: String },

    /// Backend is not reachable.
    #[error("storage unavailable")]
    Unavailable,

    /// Stored bytes could not be decoded.
    #[error("corrupted record at {key}: {message}")]
    Corrupted { key: String, message: String },
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Scan output, ordered by key.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract key-value database.
///
/// All methods take `&self`; implementations are shared between stores
/// and across tasks, so they provide their own interior synchronization.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair, overwriting any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Insert only when `key` is absent.
    ///
    /// Returns `Ok(true)` when the value was written, `Ok(false)` when a
    /// value already existed (nothing written).
    fn put_if_absent(&self, key: &[u8], value: &[u8]) -> Result<bool, KVStoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Apply all operations or none.
    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Apply the batch only when `guard` currently holds `expected`
    /// (`None` meaning absent). The comparison and the write are one
    /// atomic step.
    ///
    /// Returns `Ok(false)` (nothing written) when the guard did not match.
    fn batch_write_if(
        &self,
        guard: &[u8],
        expected: Option<&[u8]>,
        operations: Vec<BatchOperation>,
    ) -> Result<bool, KVStoreError>;

    /// All pairs whose key starts with `prefix`, in key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;
}

/// In-memory key-value store.
///
/// A single `RwLock` makes `put_if_absent` and batch writes atomic.
/// `set_available(false)` simulates an outage for failure-path tests.
#[derive(Default)]
pub struct InMemoryKVStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    unavailable: AtomicBool,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated availability.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn check_available(&self) -> Result<(), KVStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(KVStoreError::Unavailable);
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.check_available()?;
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.check_available()?;
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn put_if_absent(&self, key: &[u8], value: &[u8]) -> Result<bool, KVStoreError> {
        self.check_available()?;
        let mut data = self.data.write();
        if data.contains_key(key) {
            return Ok(false);
        }
        data.insert(key.to_vec(), value.to_vec());
        Ok(true)
    }

    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
        self.check_available()?;
        self.data.write().remove(key);
        Ok(())
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.check_available()?;
        apply(&mut self.data.write(), operations);
        Ok(())
    }

    fn batch_write_if(
        &self,
        guard: &[u8],
        expected: Option<&[u8]>,
        operations: Vec<BatchOperation>,
    ) -> Result<bool, KVStoreError> {
        self.check_available()?;
        let mut data = self.data.write();
        if data.get(guard).map(Vec::as_slice) != expected {
            return Ok(false);
        }
        apply(&mut data, operations);
        Ok(true)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        self.check_available()?;
        let data = self.data.read();
        Ok(data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

fn apply(data: &mut BTreeMap<Vec<u8>, Vec<u8>>, operations: Vec<BatchOperation>) {
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => {
                data.insert(key, value);
            }
            BatchOperation::Delete { key } => {
                data.remove(&key);
            }
        }
    }
}
