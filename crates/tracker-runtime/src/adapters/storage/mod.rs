//! # Production Storage Adapters
//!
//! Persistent storage backend using RocksDB.
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature and set `FT_STORAGE=rocksdb`:
//!
//! ```toml
//! tracker-runtime = { path = "...", features = ["rocksdb"] }
//! ```
//!
//! Requests, votes and the activity log share one keyspace; their key
//! prefixes (`req/`, `vote/`, `log/`) keep them apart.

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

// Re-export the in-memory backend for development and tests
pub use shared_types::InMemoryKVStore;
