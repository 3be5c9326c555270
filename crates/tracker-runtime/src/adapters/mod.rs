//! # Adapters
//!
//! Port implementations connecting the subsystems:
//!
//! - `LifecycleRequestDirectory`: Voting asks Request Lifecycle whether a
//!   request exists
//! - `VoteStoreCascade`: Request Lifecycle removes a deleted request's votes
//! - `storage`: key-value backends

pub mod cascade;
pub mod directory;
pub mod storage;

pub use cascade::VoteStoreCascade;
pub use directory::LifecycleRequestDirectory;
