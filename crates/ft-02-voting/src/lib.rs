//! # ft-02-voting
//!
//! Per-user typed endorsements (upvote, like) on feedback requests.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Typed votes**: upvote and like are independent rows; a user may hold both
//! - **Store-enforced uniqueness**: one row per `(request, user, type)`,
//!   guarded by an atomic constrained insert, never check-then-act
//! - **Derived counts**: aggregates and membership recomputed on every read
//! - **Bounded store calls**: every call has a deadline; elapse is a
//!   retryable infrastructure failure
//!
//! ## Architecture
//!
//! ```text
//! Gateway ──add/remove/get──→ Voting (2) ──request_exists──→ Request Lifecycle (1)
//!                                 │
//!                                 └── create / delete / counts ──→ VoteStore ──→ KeyValueStore
//!
//! Request Lifecycle (1) ──delete_by_request──→ VoteStore   (cascade on request deletion)
//! ```
//!
//! ## Error Mapping
//!
//! | VotingError | Kind |
//! |-------------|------|
//! | InvalidVoteType | validation |
//! | RequestNotFound, VoteNotFound | not_found |
//! | AlreadyVoted | conflict |
//! | Forbidden | forbidden |
//! | Store, RequestLookup, Timeout | infrastructure |
//!
//! ## Example
//!
//! ```rust,ignore
//! use ft_02_voting::{KvVoteStore, VotingApi, VotingConfig, VotingService};
//!
//! let service = VotingService::new(store, directory, VotingConfig::default());
//!
//! let outcome = service.add_vote(&principal, request_id, Some("upvote")).await?;
//! assert_eq!(outcome.message, "Vote added");
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{KvVoteStore, StaticRequestDirectory};
pub use domain::{
    Vote, VoteAggregate, VoteOutcome, VoteSummary, VoteType, Voters, VotingError, VotingResult,
};
pub use ports::inbound::VotingApi;
pub use ports::outbound::{RequestDirectory, VoteStore};
pub use service::{VotingConfig, VotingService};
