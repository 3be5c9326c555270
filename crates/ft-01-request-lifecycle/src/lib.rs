//! # ft-01-request-lifecycle
//!
//! Authoritative owner of feedback requests and their delivery status.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Submission**: new requests start in `pending` with a store-allocated id
//! - **Status machine**: admins move a request between `pending`, `backlog`,
//!   `in_progress` and `released`; nobody else can move it
//! - **Activity log**: every transition appends `{previous, new, actor, time}`
//!   in the same write as the status change
//! - **Deletion**: admin only, votes are cascaded before the request row goes
//!
//! ## Architecture
//!
//! ```text
//! Gateway ──submit/change/delete──→ Request Lifecycle (1)
//!                                       │
//!                                       ├── RequestStore + ActivityLog ──→ KeyValueStore
//!                                       │
//!                                       └── VoteCascade ──→ Voting (2)
//!
//! Voting (2) ──request_exists──→ RequestStore
//! ```
//!
//! ## Check Order for `change_status`
//!
//! | Step | Failure |
//! |------|---------|
//! | 1. target status recognized | `InvalidStatus` (validation) |
//! | 2. actor may `changeStatus` | `Forbidden` |
//! | 3. request exists | `RequestNotFound` |
//! | 4. commit status + log entry | `Store` / `Timeout` (infrastructure) |
//!
//! ## Example
//!
//! ```rust,ignore
//! use ft_01_request_lifecycle::{RequestLifecycleApi, RequestLifecycleService};
//!
//! let updated = service.change_status(&admin, request_id, Some("released")).await?;
//! assert_eq!(updated.status, RequestStatus::Released);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{KvRequestStore, RecordingVoteCascade};
pub use domain::{
    ActivityEntry, LifecycleError, LifecycleResult, NewRequest, Request, RequestFilter,
    RequestStatus,
};
pub use ports::inbound::RequestLifecycleApi;
pub use ports::outbound::{ActivityLog, RequestStore, VoteCascade};
pub use service::{LifecycleConfig, RequestLifecycleService};
