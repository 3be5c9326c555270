//! HTTP routes.
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | GET | `/health` | 200 (unauthenticated) |
//! | POST | `/requests` | 201 request |
//! | GET | `/requests?status=` | 200 requests |
//! | GET | `/requests/:id` | 200 request |
//! | DELETE | `/requests/:id` | 204 |
//! | PATCH | `/requests/:id/status` | 200 updated request |
//! | GET | `/requests/:id/history` | 200 activity entries |
//! | GET | `/requests/:id/votes` | 200 `{upvotes, likes, userVotes}` |
//! | POST | `/requests/:id/votes` | 200 `{message, upvotes, likes, userVotes}` |
//! | DELETE | `/requests/:id/votes/:type` | 200 `{message, upvotes, likes, userVotes}` |
//! | GET | `/requests/:id/voters` | 200 `{upvoters, likers}` |

use crate::domain::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::Authenticated;
use crate::ports::outbound::IdentityResolver;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use ft_01_request_lifecycle::{
    ActivityEntry, NewRequest, Request, RequestFilter, RequestLifecycleApi, RequestStatus,
};
use ft_02_voting::{VoteOutcome, VoteSummary, Voters, VotingApi};
use serde::Deserialize;
use shared_types::RequestId;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<dyn RequestLifecycleApi>,
    pub voting: Arc<dyn VotingApi>,
    pub identity: Arc<dyn IdentityResolver>,
}

/// Builds the tracker routes over the shared state.
pub fn tracker_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/requests", get(list_requests).post(submit_request))
        .route("/requests/:id", get(get_request).delete(delete_request))
        .route("/requests/:id/status", patch(change_status))
        .route("/requests/:id/history", get(get_history))
        .route("/requests/:id/votes", get(get_votes).post(add_vote))
        .route(
            "/requests/:id/votes/:vote_type",
            axum::routing::delete(remove_vote),
        )
        .route("/requests/:id/voters", get(get_voters))
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StatusBody {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VoteBody {
    #[serde(rename = "type", default)]
    vote_type: Option<String>,
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "feedback-tracker",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn submit_request(
    State(state): State<AppState>,
    Authenticated(actor): Authenticated,
    ApiJson(draft): ApiJson<NewRequest>,
) -> ApiResult<(StatusCode, Json<Request>)> {
    let request = state.lifecycle.submit_request(&actor, draft).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn list_requests(
    State(state): State<AppState>,
    Authenticated(actor): Authenticated,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Json<Vec<Request>>> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<RequestStatus>)
        .transpose()?;
    let requests = state
        .lifecycle
        .list_requests(&actor, RequestFilter { status })
        .await?;
    Ok(Json(requests))
}

async fn get_request(
    State(state): State<AppState>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<RequestId>,
) -> ApiResult<Json<Request>> {
    Ok(Json(state.lifecycle.get_request(&actor, id).await?))
}

async fn delete_request(
    State(state): State<AppState>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<RequestId>,
) -> ApiResult<StatusCode> {
    state.lifecycle.delete_request(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn change_status(
    State(state): State<AppState>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<RequestId>,
    body: Result<ApiJson<StatusBody>, ApiError>,
) -> ApiResult<Json<Request>> {
    // An unreadable body is the same failure as a missing status.
    let status = body.ok().and_then(|ApiJson(b)| b.status);
    let request = state
        .lifecycle
        .change_status(&actor, id, status.as_deref())
        .await?;
    Ok(Json(request))
}

async fn get_history(
    State(state): State<AppState>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<RequestId>,
) -> ApiResult<Json<Vec<ActivityEntry>>> {
    Ok(Json(state.lifecycle.get_history(&actor, id).await?))
}

async fn get_votes(
    State(state): State<AppState>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<RequestId>,
) -> ApiResult<Json<VoteSummary>> {
    Ok(Json(state.voting.get_votes(&actor, id).await?))
}

async fn add_vote(
    State(state): State<AppState>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<RequestId>,
    body: Result<ApiJson<VoteBody>, ApiError>,
) -> ApiResult<Json<VoteOutcome>> {
    let vote_type = body.ok().and_then(|ApiJson(b)| b.vote_type);
    let outcome = state
        .voting
        .add_vote(&actor, id, vote_type.as_deref())
        .await?;
    Ok(Json(outcome))
}

async fn remove_vote(
    State(state): State<AppState>,
    Authenticated(actor): Authenticated,
    ApiPath((id, vote_type)): ApiPath<(RequestId, String)>,
) -> ApiResult<Json<VoteOutcome>> {
    let outcome = state
        .voting
        .remove_vote(&actor, id, Some(vote_type.as_str()))
        .await?;
    Ok(Json(outcome))
}

async fn get_voters(
    State(state): State<AppState>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<RequestId>,
) -> ApiResult<Json<Voters>> {
    Ok(Json(state.voting.get_voters(&actor, id).await?))
}
