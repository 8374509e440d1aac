//! Integration tests for caller identification and role gates.

mod helpers;

use http::StatusCode;

use argus_entity::user::UserRole;

#[tokio::test]
async fn missing_identity_header_is_unauthorized() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/presence", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
}

#[tokio::test]
async fn unknown_identities_are_unauthorized() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("GET", "/api/presence", None, Some("ghost@example.com"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
}

#[tokio::test]
async fn any_resolvable_user_key_identifies_the_caller() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;

    let response = app
        .request(
            "GET",
            "/api/sessions/active",
            None,
            Some(&admin.id.to_string()),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn employees_cannot_dispatch_commands() {
    let app = helpers::TestApp::new().await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    let response = app
        .request(
            "POST",
            "/api/commands",
            Some(serde_json::json!({
                "command": "REFRESH",
                "target_email": "worker@example.com",
            })),
            Some("worker@example.com"),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "AUTHORIZATION");
}

#[tokio::test]
async fn only_admins_trigger_reconciliation() {
    let app = helpers::TestApp::new().await;
    app.seed_user("boss@example.com", UserRole::Supervisor)
        .await;
    app.seed_user("admin@example.com", UserRole::Admin).await;

    let denied = app
        .request("POST", "/api/reconcile", None, Some("boss@example.com"))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["error"], "AUTHORIZATION");

    let allowed = app
        .request("POST", "/api/reconcile", None, Some("admin@example.com"))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
}

#[tokio::test]
async fn health_needs_no_identity() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(response.body["data"]["version"].is_string());
}
