//! Static token table identity adapter.
//!
//! Table format: `token=id:email:role` entries separated by `;`.
//!
//! ```text
//! FT_TOKENS="alice-token=1:alice@corp.example:employee;ops-token=2:ops@corp.example:admin"
//! ```

use crate::ports::outbound::IdentityResolver;
use async_trait::async_trait;
use shared_types::{Principal, Role, UserId};
use std::collections::HashMap;
use thiserror::Error;

/// Token table parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid token entry #{position}: {reason}")]
pub struct TokenTableError {
    /// 1-based entry position
    pub position: usize,
    pub reason: String,
}

/// Resolves bearer tokens from a fixed table.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    principals: HashMap<String, Principal>,
}

impl StaticTokenResolver {
    pub fn new(entries: impl IntoIterator<Item = (String, Principal)>) -> Self {
        Self {
            principals: entries.into_iter().collect(),
        }
    }

    /// Parses a `token=id:email:role;...` table. Empty entries are skipped.
    pub fn parse(table: &str) -> Result<Self, TokenTableError> {
        let mut principals = HashMap::new();

        for (index, raw) in table.split(';').enumerate() {
            let entry = raw.trim();
            if entry.is_empty() {
                continue;
            }
            let position = index + 1;
            let fail = |reason: &str| TokenTableError {
                position,
                reason: reason.to_string(),
            };

            let (token, identity) = entry
                .split_once('=')
                .ok_or_else(|| fail("expected token=id:email:role"))?;
            let token = token.trim();
            if token.is_empty() {
                return Err(fail("empty token"));
            }

            let mut parts = identity.splitn(3, ':');
            let (id, email, role) = match (parts.next(), parts.next(), parts.next()) {
                (Some(id), Some(email), Some(role)) => (id.trim(), email.trim(), role.trim()),
                _ => return Err(fail("expected id:email:role")),
            };
            let id: UserId = id.parse().map_err(|_| fail("user id must be an integer"))?;
            if email.is_empty() {
                return Err(fail("empty email"));
            }
            let role: Role = role.parse().map_err(|e| fail(&format!("{}", e)))?;

            if principals
                .insert(token.to_string(), Principal::new(id, email, role))
                .is_some()
            {
                return Err(fail("duplicate token"));
            }
        }

        Ok(Self { principals })
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}

#[async_trait]
impl IdentityResolver for StaticTokenResolver {
    async fn resolve(&self, bearer_token: &str) -> Option<Principal> {
        self.principals.get(bearer_token).cloned()
    }
}
