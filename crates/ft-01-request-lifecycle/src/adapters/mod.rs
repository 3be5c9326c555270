//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound ports of the Request Lifecycle subsystem.

mod cascade;
mod kv_store;

pub use cascade::RecordingVoteCascade;
pub use kv_store::KvRequestStore;
