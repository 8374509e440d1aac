//! Integration tests for the transport lifecycle webhook.
//!
//! The webhook is the transport's delivery hook, so it always answers
//! HTTP 200; outcomes ride in the acknowledgment body.

mod helpers;

use http::StatusCode;

use argus_entity::user::UserRole;
use helpers::PRESENCE_GROUP;

#[tokio::test]
async fn connect_event_marks_the_user_online() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    app.transport
        .connect(PRESENCE_GROUP, "worker@example.com");
    let response = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "userId": "worker@example.com",
                "eventType": "system",
                "eventName": "connected",
                "connectionId": "c-1",
                "hub": PRESENCE_GROUP,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["phase"], "connect");

    let presence = app
        .request(
            "GET",
            "/api/presence/worker@example.com",
            None,
            Some(&admin.email),
        )
        .await;
    assert_eq!(presence.status, StatusCode::OK);
    assert_eq!(presence.body["data"]["status"], "online");
    assert!(presence.body["data"]["last_seen_at"].is_string());
}

#[tokio::test]
async fn broker_mode_disconnect_marks_the_user_offline() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    app.bring_online("worker@example.com").await;

    app.transport
        .disconnect(PRESENCE_GROUP, "worker@example.com");
    let response = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "userId": "worker@example.com",
                "eventType": "disconnected",
                "eventName": "notification",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["phase"], "disconnected");

    let presence = app
        .request(
            "GET",
            "/api/presence/worker@example.com",
            None,
            Some(&admin.email),
        )
        .await;
    assert_eq!(presence.body["data"]["status"], "offline");
}

#[tokio::test]
async fn custom_events_refresh_last_seen() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    app.bring_online("worker@example.com").await;
    let before = app
        .request(
            "GET",
            "/api/presence/worker@example.com",
            None,
            Some(&admin.email),
        )
        .await;
    let seen_before = parse_time(&before.body["data"]["last_seen_at"]);

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "userId": "worker@example.com",
                "eventType": "custom",
                "eventName": "notification",
            })),
            None,
        )
        .await;
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["phase"], "custom");

    let after = app
        .request(
            "GET",
            "/api/presence/worker@example.com",
            None,
            Some(&admin.email),
        )
        .await;
    let seen_after = parse_time(&after.body["data"]["last_seen_at"]);

    assert!(seen_after > seen_before);
    assert_eq!(after.body["data"]["status"], "online");
}

#[tokio::test]
async fn events_for_unknown_users_are_acknowledged_with_an_error() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "userId": "ghost@example.com",
                "eventType": "system",
                "eventName": "connected",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "error");
    let message = response.body["message"].as_str().unwrap_or_default();
    assert!(message.contains("ghost@example.com"), "{}", message);
}

#[tokio::test]
async fn unrecognized_phases_are_acknowledged_quietly() {
    let app = helpers::TestApp::new().await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "userId": "worker@example.com",
                "eventType": "system",
                "eventName": "rebooted",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["phase"], "unknown");
}

#[tokio::test]
async fn malformed_payloads_are_acknowledged_with_an_error() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request_raw("POST", "/api/events", "{not json", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "error");
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn repeated_connects_add_no_history() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    app.bring_online("worker@example.com").await;
    app.bring_online("worker@example.com").await;

    let history = app
        .request(
            "GET",
            "/api/presence/worker@example.com/history",
            None,
            Some(&admin.email),
        )
        .await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(history.body["data"].as_array().map(Vec::len), Some(1));
}

fn parse_time(value: &serde_json::Value) -> chrono::DateTime<chrono::Utc> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("a timestamp string")
}
