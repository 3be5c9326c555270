//! # HTTP Flows
//!
//! The gateway router with the production middleware stack, served by
//! the runtime container.

#[cfg(test)]
mod tests {
    use crate::harness::{
        call, router, tracker, tracker_with_store, ADMIN_TOKEN, EMPLOYEE_1_TOKEN,
        EMPLOYEE_2_TOKEN,
    };
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn submit(app: &Router, title: &str) -> u64 {
        let (status, body) = call(
            app,
            Method::POST,
            "/requests",
            Some(EMPLOYEE_1_TOKEN),
            Some(json!({
                "title": title,
                "category": "tooling",
                "priority": "high",
                "team": "platform",
                "region": "emea",
                "businessProblem": "builds take an hour",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn test_submit_then_read_back() {
        let app = router(&tracker());
        let id = submit(&app, "Faster CI").await;

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/requests/{}", id),
            Some(EMPLOYEE_2_TOKEN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Faster CI");
        assert_eq!(body["status"], "pending");
        assert_eq!(body["createdBy"], 1);
    }

    #[tokio::test]
    async fn test_vote_flow_over_http() {
        let app = router(&tracker());
        let id = submit(&app, "Dark mode").await;
        let votes = format!("/requests/{}/votes", id);

        let (status, body) = call(
            &app,
            Method::POST,
            &votes,
            Some(EMPLOYEE_1_TOKEN),
            Some(json!({"type": "upvote"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "Vote added", "upvotes": 1, "likes": 0, "userVotes": ["upvote"]})
        );

        let (_, body) = call(
            &app,
            Method::POST,
            &votes,
            Some(EMPLOYEE_2_TOKEN),
            Some(json!({"type": "upvote"})),
        )
        .await;
        assert_eq!(body["upvotes"], 2);

        let (status, body) = call(
            &app,
            Method::POST,
            &votes,
            Some(EMPLOYEE_1_TOKEN),
            Some(json!({"type": "upvote"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], "You have already upvoted this request");

        let (status, body) = call(
            &app,
            Method::DELETE,
            &format!("{}/upvote", votes),
            Some(EMPLOYEE_1_TOKEN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Vote removed");
        assert_eq!(body["upvotes"], 1);
        assert_eq!(body["userVotes"], json!([]));

        let (_, body) = call(&app, Method::GET, &votes, Some(EMPLOYEE_2_TOKEN), None).await;
        assert_eq!(body, json!({"upvotes": 1, "likes": 0, "userVotes": ["upvote"]}));
    }

    #[tokio::test]
    async fn test_status_change_and_history_over_http() {
        let app = router(&tracker());
        let id = submit(&app, "SSO").await;
        let status_uri = format!("/requests/{}/status", id);

        let (status, body) = call(
            &app,
            Method::PATCH,
            &status_uri,
            Some(ADMIN_TOKEN),
            Some(json!({"status": "in_progress"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "in_progress");

        let (status, body) = call(
            &app,
            Method::PATCH,
            &status_uri,
            Some(ADMIN_TOKEN),
            Some(json!({"status": "shipped"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/requests/{}/history", id),
            Some(EMPLOYEE_1_TOKEN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["previousStatus"], "pending");
        assert_eq!(entries[0]["newStatus"], "in_progress");
        assert_eq!(entries[0]["actorId"], 9);

        let (_, body) = call(
            &app,
            Method::GET,
            "/requests?status=in_progress",
            Some(EMPLOYEE_2_TOKEN),
            None,
        )
        .await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_over_http() {
        let app = router(&tracker());
        let id = submit(&app, "Old idea").await;
        call(
            &app,
            Method::POST,
            &format!("/requests/{}/votes", id),
            Some(EMPLOYEE_2_TOKEN),
            Some(json!({"type": "like"})),
        )
        .await;

        let uri = format!("/requests/{}", id);
        let (status, body) = call(&app, Method::DELETE, &uri, Some(ADMIN_TOKEN), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = call(&app, Method::GET, &uri, Some(EMPLOYEE_1_TOKEN), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");

        let (status, _) = call(&app, Method::DELETE, &uri, Some(ADMIN_TOKEN), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_field_is_validation() {
        let app = router(&tracker());
        let (status, body) = call(
            &app,
            Method::POST,
            "/requests",
            Some(EMPLOYEE_1_TOKEN),
            Some(json!({"title": "  ", "businessProblem": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let app = router(&tracker());
        let (status, body) = call(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_store_outage_maps_to_503() {
        let (t, kv) = tracker_with_store();
        let app = router(&t);
        let id = submit(&app, "Resilience").await;
        kv.set_available(false);

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/requests/{}/votes", id),
            Some(EMPLOYEE_1_TOKEN),
            Some(json!({"type": "like"})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "infrastructure");
    }

    #[tokio::test]
    async fn test_oversized_body_is_refused_before_routing() {
        let t = tracker();
        let app = router(&t);
        let limit = t.gateway().unwrap().config().max_body_bytes;
        let oversized = vec![b' '; limit + 1];

        let request = Request::builder()
            .method(Method::POST)
            .uri("/requests")
            .header(header::AUTHORIZATION, format!("Bearer {}", EMPLOYEE_1_TOKEN))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, oversized.len())
            .body(Body::from(oversized))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        // Bodies under the limit still reach the handlers through the same stack.
        submit(&app, "Small enough").await;
    }
}
