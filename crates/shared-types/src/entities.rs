//! # Core Domain Entities
//!
//! Identifiers and the resolved principal shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `UserId`, `Role`, `Principal`
//! - **Tracking**: `RequestId`, `Timestamp`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Identifier of a user, owned by the external Identity Context.
pub type UserId = u64;

/// Role attached to a principal.
///
/// Flat two-role model. New roles are added as variants and as rows in
/// `policy::can_perform`; callers never match on roles directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular authenticated user.
    Employee,
    /// Triage and delivery administrator.
    Admin,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "employee" => Ok(Role::Employee),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Returned when a role name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Authenticated identity attached to every inbound action.
///
/// Produced by the Identity Context; the core trusts it and never
/// mutates it during an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User identifier.
    pub id: UserId,
    /// Contact email.
    pub email: String,
    /// Role used for authorization decisions.
    pub role: Role,
}

impl Principal {
    pub fn new(id: UserId, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }

    pub fn employee(id: UserId, email: impl Into<String>) -> Self {
        Self::new(id, email, Role::Employee)
    }

    pub fn admin(id: UserId, email: impl Into<String>) -> Self {
        Self::new(id, email, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// CLUSTER B: TRACKING
// =============================================================================

/// Identifier of a tracked request.
pub type RequestId = u64;

/// Milliseconds since UNIX epoch.
pub type Timestamp = u64;
