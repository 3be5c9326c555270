//! # RocksDB Storage Adapter
//!
//! Production RocksDB implementation of the `KeyValueStore` trait.
//!
//! ## Features
//!
//! - Atomic batch writes (WriteBatch)
//! - Snappy compression
//! - Bloom filters for point lookups
//! - Write-ahead logging, fsync per write by default
//!
//! ## Constrained Insert
//!
//! `put_if_absent` and `batch_write_if` run their guard read and their write
//! while holding the handle's write lock. Every other write takes the same
//! lock, so no concurrent writer can slip between the two steps.

use parking_lot::RwLock;
use rocksdb::{Direction, IteratorMode, Options, WriteBatch, WriteOptions, DB};
use shared_types::{BatchOperation, KVStoreError, KeyValueStore, ScanResult};
use std::path::PathBuf;

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Maximum number of write buffers (default: 3)
    pub max_write_buffer_number: i32,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/rocksdb"),
            block_cache_size: 64 * 1024 * 1024,  // 64MB
            write_buffer_size: 16 * 1024 * 1024, // 16MB
            max_write_buffer_number: 3,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Config rooted at `path` with default tuning.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,  // 8MB
            write_buffer_size: 4 * 1024 * 1024, // 4MB
            max_write_buffer_number: 2,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed key-value store implementing the KeyValueStore trait
pub struct RocksDbStore {
    db: RwLock<DB>,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create a RocksDB database
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        // Performance tuning
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_max_write_buffer_number(config.max_write_buffer_number);

        // Compression
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        // Bloom filter for faster lookups
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, &config.path).map_err(|e| KVStoreError::IOError {
            message: format!("Failed to open RocksDB at {}: {}", config.path.display(), e),
        })?;

        Ok(Self {
            db: RwLock::new(db),
            config,
        })
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

/// Maps a RocksDB failure for `operation` onto the port's error.
fn io_error(operation: &'static str) -> impl Fn(rocksdb::Error) -> KVStoreError {
    move |e| KVStoreError::IOError {
        message: format!("RocksDB {} failed: {}", operation, e),
    }
}

fn to_write_batch(operations: Vec<BatchOperation>) -> WriteBatch {
    let mut batch = WriteBatch::default();
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => batch.put(key, value),
            BatchOperation::Delete { key } => batch.delete(key),
        }
    }
    batch
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db.read().get(key).map_err(io_error("get"))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .write()
            .put_opt(key, value, &self.write_options())
            .map_err(io_error("put"))
    }

    fn put_if_absent(&self, key: &[u8], value: &[u8]) -> Result<bool, KVStoreError> {
        let db = self.db.write();
        if db.get_pinned(key).map_err(io_error("get"))?.is_some() {
            return Ok(false);
        }
        db.put_opt(key, value, &self.write_options())
            .map_err(io_error("put"))?;
        Ok(true)
    }

    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .write()
            .delete_opt(key, &self.write_options())
            .map_err(io_error("delete"))
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.db
            .write()
            .write_opt(to_write_batch(operations), &self.write_options())
            .map_err(io_error("batch write"))
    }

    fn batch_write_if(
        &self,
        guard: &[u8],
        expected: Option<&[u8]>,
        operations: Vec<BatchOperation>,
    ) -> Result<bool, KVStoreError> {
        let batch = to_write_batch(operations);
        let db = self.db.write();
        let current = db.get_pinned(guard).map_err(io_error("get"))?;
        if current.as_deref() != expected {
            return Ok(false);
        }
        db.write_opt(batch, &self.write_options())
            .map_err(io_error("batch write"))?;
        Ok(true)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        let db = self.db.read();
        let mut results = Vec::new();

        for item in db.iterator(IteratorMode::From(prefix, Direction::Forward)) {
            let (key, value) = item.map_err(io_error("scan"))?;
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.into_vec(), value.into_vec()));
        }

        Ok(results)
    }
}
