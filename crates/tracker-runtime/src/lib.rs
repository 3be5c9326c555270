//! # Tracker Runtime Library
//!
//! Exposes the runtime's wiring for the integration tests. The entry point
//! is the `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **DDD**: each subsystem owns its domain logic and its store
//! - **Hexagonal Architecture**: ports define contracts, adapters here
//!   implement the ones that cross subsystem boundaries
//! - **Pluggable storage**: in-memory by default, RocksDB behind a feature

pub mod adapters;
pub mod container;

pub use container::{
    ConcreteLifecycleService, ConcreteVotingService, ConfigError, ContainerError, StorageBackend,
    StorageConfig, TrackerConfig, TrackerContainer,
};
