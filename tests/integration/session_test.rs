//! Integration tests for streaming session lifecycle and visibility.

mod helpers;

use http::StatusCode;

use argus_entity::user::UserRole;

async fn dispatch(app: &helpers::TestApp, operator: &str, command: &str, target: &str) {
    let response = app
        .request(
            "POST",
            "/api/commands",
            Some(serde_json::json!({
                "command": command,
                "target_email": target,
            })),
            Some(operator),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
}

#[tokio::test]
async fn start_opens_a_session_visible_to_admins() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    let worker = app
        .seed_user("worker@example.com", UserRole::Employee)
        .await;
    app.bring_online("worker@example.com").await;

    dispatch(&app, &admin.email, "START", "worker@example.com").await;

    let active = app
        .request("GET", "/api/sessions/active", None, Some(&admin.email))
        .await;
    assert_eq!(active.status, StatusCode::OK);
    let rows = active.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], worker.id.to_string().as_str());
    assert!(rows[0]["started_at"].is_string());
    assert!(rows[0]["stopped_at"].is_null());
}

#[tokio::test]
async fn a_second_start_supersedes_the_open_session() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;
    app.bring_online("worker@example.com").await;

    dispatch(&app, &admin.email, "START", "worker@example.com").await;
    dispatch(&app, &admin.email, "START", "worker@example.com").await;

    let active = app
        .request("GET", "/api/sessions/active", None, Some(&admin.email))
        .await;
    assert_eq!(active.body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn stop_closes_the_open_session() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;
    app.bring_online("worker@example.com").await;

    dispatch(&app, &admin.email, "START", "worker@example.com").await;
    dispatch(&app, &admin.email, "STOP", "worker@example.com").await;

    let active = app
        .request("GET", "/api/sessions/active", None, Some(&admin.email))
        .await;
    assert_eq!(active.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn disconnect_closes_the_open_session() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;
    app.bring_online("worker@example.com").await;

    dispatch(&app, &admin.email, "START", "worker@example.com").await;
    app.take_offline("worker@example.com").await;

    let active = app
        .request("GET", "/api/sessions/active", None, Some(&admin.email))
        .await;
    assert_eq!(active.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn session_visibility_is_scoped_by_role() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("ops@example.com", UserRole::Admin).await;
    let boss = app.seed_user("boss@example.com", UserRole::Supervisor).await;
    let reporting = app
        .seed_supervised("reporting@example.com", UserRole::Employee, Some(boss.id))
        .await;
    app.seed_user("unrelated@example.com", UserRole::Employee)
        .await;

    app.bring_online("reporting@example.com").await;
    app.bring_online("unrelated@example.com").await;
    dispatch(&app, &admin.email, "START", "reporting@example.com").await;
    dispatch(&app, &admin.email, "START", "unrelated@example.com").await;

    let admins_view = app
        .request("GET", "/api/sessions/active", None, Some(&admin.email))
        .await;
    assert_eq!(admins_view.body["data"].as_array().map(Vec::len), Some(2));

    let scoped = app
        .request("GET", "/api/sessions/active", None, Some(&boss.email))
        .await;
    let rows = scoped.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], reporting.id.to_string().as_str());

    let none = app
        .request(
            "GET",
            "/api/sessions/active",
            None,
            Some("unrelated@example.com"),
        )
        .await;
    assert_eq!(none.body["data"].as_array().map(Vec::len), Some(0));
}
