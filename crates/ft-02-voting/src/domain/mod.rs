//! # Domain Layer - Voting Subsystem
//!
//! ## Components
//!
//! - `entities`: Vote, VoteType, VoteAggregate, VoteSummary, VoteOutcome
//! - `errors`: VotingError enumeration

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
