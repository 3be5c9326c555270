//! # Authorization Policy
//!
//! The single, authoritative decision table for role-scoped mutations.
//!
//! | Action | Employee | Admin |
//! |--------|----------|-------|
//! | `Vote` | yes | yes |
//! | `ChangeStatus` | no | yes |
//! | `DeleteRequest` | no | yes |
//! | `ViewAnalytics` | no | yes |
//! | `ManageUsers` | no | yes |
//!
//! `can_perform` is total over `Role x Action`; the exhaustive match keeps a
//! new role or action from compiling until its row is filled in.

use crate::entities::{Principal, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions gated by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Vote,
    ChangeStatus,
    DeleteRequest,
    ViewAnalytics,
    ManageUsers,
}

impl Action {
    /// All recognized actions.
    pub const ALL: [Action; 5] = [
        Action::Vote,
        Action::ChangeStatus,
        Action::DeleteRequest,
        Action::ViewAnalytics,
        Action::ManageUsers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Vote => "vote",
            Action::ChangeStatus => "changeStatus",
            Action::DeleteRequest => "deleteRequest",
            Action::ViewAnalytics => "viewAnalytics",
            Action::ManageUsers => "manageUsers",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether `role` may perform `action`.
pub fn can_perform(role: Role, action: Action) -> bool {
    match (role, action) {
        (_, Action::Vote) => true,
        (Role::Admin, _) => true,
        (
            Role::Employee,
            Action::ChangeStatus
            | Action::DeleteRequest
            | Action::ViewAnalytics
            | Action::ManageUsers,
        ) => false,
    }
}

/// Authorization refusal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Role {role} is not permitted to {action}")]
pub struct Denied {
    pub role: Role,
    pub action: Action,
}

/// Gate helper: `Ok(())` when the principal's role allows `action`.
pub fn authorize(principal: &Principal, action: Action) -> Result<(), Denied> {
    if can_perform(principal.role, action) {
        Ok(())
    } else {
        Err(Denied {
            role: principal.role,
            action,
        })
    }
}
