//! # Subsystem Container
//!
//! Holds the subsystem instances and wires them through their ports.
//!
//! - Request Lifecycle and Voting never import each other's services; each
//!   sees the other only through a port adapter from `crate::adapters`
//! - Both subsystems share one `KeyValueStore`

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, StorageBackend, StorageConfig, TrackerConfig};
pub use subsystems::{
    ConcreteLifecycleService, ConcreteVotingService, ContainerError, TrackerContainer,
};
