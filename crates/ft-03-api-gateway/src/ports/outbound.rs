//! Outbound ports for the API Gateway.

use async_trait::async_trait;
use shared_types::Principal;

/// Identity Context boundary.
///
/// Turns a bearer credential into a principal. The gateway never issues
/// or verifies credentials itself; `None` means the caller is not
/// authenticated and the request stops before reaching any subsystem.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, bearer_token: &str) -> Option<Principal>;
}
