//! Core domain entities for the Request Lifecycle subsystem.
//!
//! ## Status Machine
//!
//! ```text
//!            (submit)
//!               │
//!               ▼
//!          [pending] ──▶ [backlog] ──▶ [in_progress] ──▶ [released]
//!               ▲            ▲  │           ▲  │               │
//!               └────────────┴──┴───────────┴──┴───────────────┘
//!                      any admin move between recognized states
//! ```
//!
//! `pending` is the untriaged intake state; `backlog` is the first triaged
//! state. The machine trusts admin judgment: every recognized target is
//! reachable from every state, including the current one. Non-admins
//! cannot move a request at all.

use super::errors::LifecycleError;
use serde::{Deserialize, Serialize};
use shared_types::{RequestId, Timestamp, UserId};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Backlog,
    InProgress,
    Released,
}

impl RequestStatus {
    /// Recognized states in pipeline order.
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::Backlog,
        RequestStatus::InProgress,
        RequestStatus::Released,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Backlog => "backlog",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Released => "released",
        }
    }

    /// No forward transition is defined out of this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Released)
    }

    /// Parses raw transport input; absent and unknown values fail alike.
    pub fn parse(input: Option<&str>) -> Result<Self, LifecycleError> {
        match input {
            Some(raw) => raw.parse(),
            None => Err(LifecycleError::InvalidStatus { given: None }),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == trimmed)
            .ok_or_else(|| LifecycleError::InvalidStatus {
                given: Some(s.to_string()),
            })
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked feedback or feature request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    pub title: String,
    pub category: String,
    pub priority: String,
    pub team: String,
    pub region: String,
    pub business_problem: String,
    pub status: RequestStatus,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

/// Submission payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewRequest {
    pub title: String,
    pub category: String,
    pub priority: String,
    pub team: String,
    pub region: String,
    pub business_problem: String,
}

impl NewRequest {
    /// Rejects blank required fields.
    pub fn validate(&self) -> Result<(), LifecycleError> {
        if self.title.trim().is_empty() {
            return Err(LifecycleError::MissingField { field: "Title" });
        }
        if self.business_problem.trim().is_empty() {
            return Err(LifecycleError::MissingField {
                field: "Business problem",
            });
        }
        Ok(())
    }

    /// Builds the stored entity in its initial state.
    pub fn into_request(self, id: RequestId, created_by: UserId, created_at: Timestamp) -> Request {
        Request {
            id,
            title: self.title.trim().to_string(),
            category: self.category,
            priority: self.priority,
            team: self.team,
            region: self.region,
            business_problem: self.business_problem.trim().to_string(),
            status: RequestStatus::Pending,
            created_by,
            created_at,
        }
    }
}

/// One row of the append-only status audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: Uuid,
    pub request_id: RequestId,
    pub actor_id: UserId,
    pub previous_status: RequestStatus,
    pub new_status: RequestStatus,
    pub timestamp: Timestamp,
}

impl ActivityEntry {
    pub fn transition(
        request_id: RequestId,
        actor_id: UserId,
        previous_status: RequestStatus,
        new_status: RequestStatus,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_id,
            actor_id,
            previous_status,
            new_status,
            timestamp,
        }
    }
}

/// Listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
}

impl RequestFilter {
    pub fn with_status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    pub fn matches(&self, request: &Request) -> bool {
        self.status.map_or(true, |s| request.status == s)
    }
}
