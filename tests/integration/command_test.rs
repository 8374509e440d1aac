//! Integration tests for command dispatch and the device poll loop.

mod helpers;

use http::StatusCode;

use argus_entity::user::UserRole;
use argus_transport::PublishTarget;

#[tokio::test]
async fn dispatch_to_an_online_target_is_published() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;
    app.bring_online("worker@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/commands",
            Some(serde_json::json!({
                "command": "START",
                "target_email": "worker@example.com",
                "reason": "spot check",
            })),
            Some(&admin.email),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["delivered"], true);
    assert_eq!(response.body["status"], "Published");
    assert!(response.body["commandId"].is_string());

    let published = app.transport.published().await;
    let push = published
        .iter()
        .find(|m| m.target == PublishTarget::identity("worker@example.com"))
        .expect("a push on the target's identity channel");
    assert_eq!(push.payload["type"], "command");
    assert_eq!(push.payload["command"], "START");
    assert_eq!(push.payload["reason"], "spot check");
    assert_eq!(push.payload["initiated_by"], "ops@example.com");
}

#[tokio::test]
async fn dispatch_to_an_offline_target_stays_pending() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
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
            Some(&admin.email),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["delivered"], false);
    assert_eq!(response.body["status"], "Pending");

    let published = app.transport.published().await;
    assert!(
        !published
            .iter()
            .any(|m| matches!(m.target, PublishTarget::Identity(_)))
    );
}

#[tokio::test]
async fn command_names_are_case_insensitive() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    let response = app
        .request(
            "POST",
            "/api/commands",
            Some(serde_json::json!({
                "command": "refresh",
                "target_email": "worker@example.com",
            })),
            Some(&admin.email),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "Pending");
}

#[tokio::test]
async fn unrecognized_commands_are_rejected() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    let response = app
        .request(
            "POST",
            "/api/commands",
            Some(serde_json::json!({
                "command": "REBOOT",
                "target_email": "worker@example.com",
            })),
            Some(&admin.email),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn dispatch_to_an_unknown_target_is_not_found() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;

    let response = app
        .request(
            "POST",
            "/api/commands",
            Some(serde_json::json!({
                "command": "REFRESH",
                "target_email": "ghost@example.com",
            })),
            Some(&admin.email),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn supervisors_reach_only_their_supervisees() {
    let app = helpers::TestApp::new().await;
    let boss = app.seed_user("boss@example.com", UserRole::Supervisor).await;
    app.seed_supervised("reporting@example.com", UserRole::Employee, Some(boss.id))
        .await;
    app.seed_user("unrelated@example.com", UserRole::Employee)
        .await;

    let allowed = app
        .request(
            "POST",
            "/api/commands",
            Some(serde_json::json!({
                "command": "REFRESH",
                "target_email": "reporting@example.com",
            })),
            Some(&boss.email),
        )
        .await;
    assert_eq!(allowed.status, StatusCode::OK);

    let denied = app
        .request(
            "POST",
            "/api/commands",
            Some(serde_json::json!({
                "command": "REFRESH",
                "target_email": "unrelated@example.com",
            })),
            Some(&boss.email),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["error"], "AUTHORIZATION");
}

#[tokio::test]
async fn devices_poll_until_they_acknowledge() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    let dispatched = app
        .request(
            "POST",
            "/api/commands",
            Some(serde_json::json!({
                "command": "REFRESH",
                "target_email": "worker@example.com",
            })),
            Some(&admin.email),
        )
        .await;
    assert_eq!(dispatched.body["delivered"], false);
    let command_id = dispatched.body["commandId"].as_str().unwrap().to_string();

    // The poll itself is the delivery: pending rows come back published.
    let first_poll = app
        .request(
            "GET",
            "/api/commands/pending",
            None,
            Some("worker@example.com"),
        )
        .await;
    assert_eq!(first_poll.status, StatusCode::OK);
    let rows = first_poll.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], command_id.as_str());
    assert_eq!(rows[0]["status"], "published");
    assert!(rows[0]["published_at"].is_string());

    // Still outstanding until acknowledged.
    let second_poll = app
        .request(
            "GET",
            "/api/commands/pending",
            None,
            Some("worker@example.com"),
        )
        .await;
    assert_eq!(second_poll.body["data"].as_array().map(Vec::len), Some(1));

    let ack = app
        .request(
            "POST",
            &format!("/api/commands/{command_id}/ack"),
            None,
            Some("worker@example.com"),
        )
        .await;
    assert_eq!(ack.status, StatusCode::OK);
    assert_eq!(ack.body["data"]["status"], "acknowledged");
    assert!(ack.body["data"]["acknowledged_at"].is_string());

    let drained = app
        .request(
            "GET",
            "/api/commands/pending",
            None,
            Some("worker@example.com"),
        )
        .await;
    assert_eq!(drained.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn acknowledging_someone_elses_command_is_not_found() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;
    app.seed_user("other@example.com", UserRole::Employee).await;

    let dispatched = app
        .request(
            "POST",
            "/api/commands",
            Some(serde_json::json!({
                "command": "REFRESH",
                "target_email": "worker@example.com",
            })),
            Some(&admin.email),
        )
        .await;
    let command_id = dispatched.body["commandId"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/commands/{command_id}/ack"),
            None,
            Some("other@example.com"),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recent_commands_are_scoped_and_newest_first() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;
    app.seed_user("other@example.com", UserRole::Employee).await;

    for command in ["REFRESH", "STOP"] {
        let response = app
            .request(
                "POST",
                "/api/commands",
                Some(serde_json::json!({
                    "command": command,
                    "target_email": "worker@example.com",
                })),
                Some(&admin.email),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let admins_view = app
        .request(
            "GET",
            "/api/commands/recent?target_email=worker@example.com",
            None,
            Some(&admin.email),
        )
        .await;
    assert_eq!(admins_view.status, StatusCode::OK);
    let rows = admins_view.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["command"], "STOP");
    assert_eq!(rows[1]["command"], "REFRESH");

    // Targets always see their own trail.
    let own_view = app
        .request(
            "GET",
            "/api/commands/recent?target_email=worker@example.com",
            None,
            Some("worker@example.com"),
        )
        .await;
    assert_eq!(own_view.body["data"].as_array().map(Vec::len), Some(2));

    let denied = app
        .request(
            "GET",
            "/api/commands/recent?target_email=worker@example.com",
            None,
            Some("other@example.com"),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}
