//! Bearer authentication.
//!
//! Every tracker route except `/health` takes an `Authenticated` argument,
//! so a missing or unknown credential is rejected with 401 before the
//! handler body runs.

use crate::domain::ApiError;
use crate::routes::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use shared_types::Principal;
use tracing::{debug, warn};

/// Principal resolved from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            debug!(path = %parts.uri.path(), "[ft-03] request without bearer credential");
            return Err(ApiError::unauthenticated("Authentication required"));
        };

        match state.identity.resolve(token).await {
            Some(principal) => Ok(Authenticated(principal)),
            None => {
                warn!(path = %parts.uri.path(), "[ft-03] bearer credential not recognized");
                Err(ApiError::unauthenticated("Invalid or expired token"))
            }
        }
    }
}

/// Extracts the credential from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
