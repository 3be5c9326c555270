//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound ports of the Voting subsystem.

mod directory;
mod kv_store;

pub use directory::StaticRequestDirectory;
pub use kv_store::KvVoteStore;
