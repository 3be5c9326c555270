//! Core domain entities for the Voting subsystem.
//!
//! Votes are independent typed rows: a user may hold an upvote and a like
//! on the same request at once, and each type is cast and retracted on its
//! own.
//!
//! INVARIANT-1: at most one `Vote` per `(request_id, user_id, vote_type)`.
//! INVARIANT-2: `VoteAggregate` and user membership are always derived from
//! the live vote rows, never cached.

use super::errors::VotingError;
use serde::{Deserialize, Serialize};
use shared_types::{RequestId, Timestamp, UserId};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Kind of endorsement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Like,
}

impl VoteType {
    pub const ALL: [VoteType; 2] = [VoteType::Upvote, VoteType::Like];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Like => "like",
        }
    }

    /// Verb used in user-facing messages ("already upvoted").
    pub fn past_tense(&self) -> &'static str {
        match self {
            VoteType::Upvote => "upvoted",
            VoteType::Like => "liked",
        }
    }

    /// Parses raw transport input. Absent and unrecognized types are the
    /// same validation failure.
    pub fn parse(input: Option<&str>) -> Result<Self, VotingError> {
        match input.map(str::trim) {
            Some("upvote") => Ok(VoteType::Upvote),
            Some("like") => Ok(VoteType::Like),
            other => Err(VotingError::InvalidVoteType {
                given: other.map(str::to_string),
            }),
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single persisted endorsement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    pub request_id: RequestId,
    pub user_id: UserId,
    pub vote_type: VoteType,
    /// Cast time (ms), used to order voter exports.
    pub created_at: Timestamp,
}

impl Vote {
    pub fn new(
        request_id: RequestId,
        user_id: UserId,
        vote_type: VoteType,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_id,
            user_id,
            vote_type,
            created_at,
        }
    }
}

/// Per-type counts for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteAggregate {
    pub upvotes: u64,
    pub likes: u64,
}

impl VoteAggregate {
    /// Counts a slice of vote rows.
    pub fn from_votes<'a>(votes: impl IntoIterator<Item = &'a Vote>) -> Self {
        votes
            .into_iter()
            .fold(Self::default(), |mut acc, vote| {
                match vote.vote_type {
                    VoteType::Upvote => acc.upvotes += 1,
                    VoteType::Like => acc.likes += 1,
                }
                acc
            })
    }
}

/// Counts plus the caller's own vote types, recomputed on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary {
    pub upvotes: u64,
    pub likes: u64,
    pub user_votes: Vec<VoteType>,
}

impl VoteSummary {
    pub fn new(aggregate: VoteAggregate, membership: BTreeSet<VoteType>) -> Self {
        Self {
            upvotes: aggregate.upvotes,
            likes: aggregate.likes,
            user_votes: membership.into_iter().collect(),
        }
    }

    pub fn holds(&self, vote_type: VoteType) -> bool {
        self.user_votes.contains(&vote_type)
    }
}

/// Result of a successful cast or retraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub message: String,
    #[serde(flatten)]
    pub summary: VoteSummary,
}

impl VoteOutcome {
    pub const ADDED: &'static str = "Vote added";
    pub const REMOVED: &'static str = "Vote removed";

    pub fn added(summary: VoteSummary) -> Self {
        Self {
            message: Self::ADDED.to_string(),
            summary,
        }
    }

    pub fn removed(summary: VoteSummary) -> Self {
        Self {
            message: Self::REMOVED.to_string(),
            summary,
        }
    }
}

/// Voter export for reporting consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voters {
    pub upvoters: Vec<UserId>,
    pub likers: Vec<UserId>,
}
