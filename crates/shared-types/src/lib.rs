//! # Shared Types Crate
//!
//! Cross-subsystem definitions for the feedback tracker.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers, the principal and the error
//!   taxonomy are defined once and reused by every subsystem.
//! - **One Policy Table**: role checks go through `policy::authorize`; no
//!   subsystem inspects `Role` on its own.
//! - **Classified Failures**: subsystem errors convert into `TrackerError`,
//!   the only error type the transport boundary understands.

pub mod clock;
pub mod entities;
pub mod errors;
pub mod policy;
pub mod storage;

pub use clock::{MockTimeSource, SystemTimeSource, TimeSource};
pub use entities::*;
pub use errors::*;
pub use policy::{authorize, can_perform, Action, Denied};
pub use storage::{BatchOperation, InMemoryKVStore, KVStoreError, KeyValueStore, ScanResult};
