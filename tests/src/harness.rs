//! Shared fixtures: a fully wired in-memory tracker and an HTTP driver.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use ft_01_request_lifecycle::NewRequest;
use shared_types::{InMemoryKVStore, MockTimeSource, Principal};
use tracker_runtime::{TrackerConfig, TrackerContainer};

pub const EMPLOYEE_1_TOKEN: &str = "token-u1";
pub const EMPLOYEE_2_TOKEN: &str = "token-u2";
pub const ADMIN_TOKEN: &str = "token-admin";

const TOKEN_TABLE: &str = "token-u1=1:u1@corp.example:employee;\
                           token-u2=2:u2@corp.example:employee;\
                           token-admin=9:ops@corp.example:admin";

pub fn u1() -> Principal {
    Principal::employee(1, "u1@corp.example")
}

pub fn u2() -> Principal {
    Principal::employee(2, "u2@corp.example")
}

pub fn admin() -> Principal {
    Principal::admin(9, "ops@corp.example")
}

/// Container over a fresh in-memory store and a fixed clock.
pub fn tracker() -> TrackerContainer {
    let (container, _) = tracker_with_store();
    container
}

/// Container plus a handle on its store, for outage simulation.
pub fn tracker_with_store() -> (TrackerContainer, Arc<InMemoryKVStore>) {
    let kv = Arc::new(InMemoryKVStore::new());
    (tracker_over(kv.clone()), kv)
}

/// Container over existing data, as after a process restart.
pub fn tracker_over(kv: Arc<InMemoryKVStore>) -> TrackerContainer {
    let config = TrackerConfig {
        tokens: TOKEN_TABLE.to_string(),
        ..TrackerConfig::default()
    };
    TrackerContainer::with_store(config, kv, Arc::new(MockTimeSource::new(1_000)))
        .expect("container wiring")
}

pub fn draft(title: &str) -> NewRequest {
    NewRequest {
        title: title.to_string(),
        category: "tooling".to_string(),
        priority: "medium".to_string(),
        team: "platform".to_string(),
        region: "emea".to_string(),
        business_problem: format!("{} is missing", title),
    }
}

/// Router with the production middleware stack.
pub fn router(container: &TrackerContainer) -> Router {
    container.gateway().expect("gateway config").router()
}

/// Sends one request and decodes the JSON body (`Null` when empty).
pub async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}
