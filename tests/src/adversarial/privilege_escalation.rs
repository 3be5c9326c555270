//! # Privilege Escalation Attempts
//!
//! Employees and unauthenticated callers probing admin-only operations.
//! Every attempt must be refused before any state changes.

#[cfg(test)]
mod tests {
    use crate::harness::{call, router, tracker, ADMIN_TOKEN, EMPLOYEE_1_TOKEN};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    async fn seeded() -> (axum::Router, u64) {
        let app = router(&tracker());
        let (status, body) = call(
            &app,
            Method::POST,
            "/requests",
            Some(EMPLOYEE_1_TOKEN),
            Some(json!({"title": "Target", "businessProblem": "needed"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_u64().unwrap();

        let (status, _) = call(
            &app,
            Method::PATCH,
            &format!("/requests/{}/status", id),
            Some(ADMIN_TOKEN),
            Some(json!({"status": "backlog"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        (app, id)
    }

    #[tokio::test]
    async fn test_employee_cannot_change_status() {
        let (app, id) = seeded().await;

        let (status, body) = call(
            &app,
            Method::PATCH,
            &format!("/requests/{}/status", id),
            Some(EMPLOYEE_1_TOKEN),
            Some(json!({"status": "released"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "forbidden");

        let (_, body) = call(
            &app,
            Method::GET,
            &format!("/requests/{}", id),
            Some(EMPLOYEE_1_TOKEN),
            None,
        )
        .await;
        assert_eq!(body["status"], "backlog");
    }

    #[tokio::test]
    async fn test_employee_cannot_delete_even_missing_requests() {
        let (app, id) = seeded().await;

        for target in [id, 9_999] {
            let (status, _) = call(
                &app,
                Method::DELETE,
                &format!("/requests/{}", target),
                Some(EMPLOYEE_1_TOKEN),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::FORBIDDEN, "request {}", target);
        }

        let (status, _) = call(
            &app,
            Method::GET,
            &format!("/requests/{}", id),
            Some(EMPLOYEE_1_TOKEN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_employee_cannot_export_voters() {
        let (app, id) = seeded().await;
        let (status, _) = call(
            &app,
            Method::GET,
            &format!("/requests/{}/voters", id),
            Some(EMPLOYEE_1_TOKEN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_forged_or_missing_tokens_are_rejected() {
        let (app, id) = seeded().await;
        let uri = format!("/requests/{}/status", id);
        let body = json!({"status": "released"});

        let (status, err) = call(&app, Method::PATCH, &uri, None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(err["error"], "unauthenticated");

        let (status, _) = call(&app, Method::PATCH, &uri, Some("admin"), Some(body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, current) = call(
            &app,
            Method::GET,
            &format!("/requests/{}", id),
            Some(ADMIN_TOKEN),
            None,
        )
        .await;
        assert_eq!(current["status"], "backlog");
    }
}
