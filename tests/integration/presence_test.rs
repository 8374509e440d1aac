//! Integration tests for presence queries and reconciliation.

mod helpers;

use http::StatusCode;

use argus_entity::user::UserRole;
use helpers::PRESENCE_GROUP;

#[tokio::test]
async fn never_seen_users_list_as_offline() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    let response = app
        .request("GET", "/api/presence", None, Some(&admin.email))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let rows = response.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["status"], "offline");
        assert!(row["last_seen_at"].is_null());
    }
}

#[tokio::test]
async fn the_listing_reflects_connectivity() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    app.bring_online("worker@example.com").await;

    let response = app
        .request("GET", "/api/presence", None, Some(&admin.email))
        .await;
    let rows = response.body["data"].as_array().unwrap();

    let worker = rows
        .iter()
        .find(|row| row["email"] == "worker@example.com")
        .expect("the worker should be listed");
    assert_eq!(worker["status"], "online");
    assert!(worker["last_seen_at"].is_string());

    let admin_row = rows
        .iter()
        .find(|row| row["email"] == "admin@example.com")
        .expect("the admin should be listed");
    assert_eq!(admin_row["status"], "offline");
}

#[tokio::test]
async fn employees_can_read_presence() {
    let app = helpers::TestApp::new().await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    let response = app
        .request("GET", "/api/presence", None, Some("worker@example.com"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn lookup_accepts_any_user_key() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;
    let worker = app
        .seed_user("worker@example.com", UserRole::Employee)
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/presence/{}", worker.id),
            None,
            Some(&admin.email),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "worker@example.com");
    assert_eq!(response.body["data"]["status"], "offline");
}

#[tokio::test]
async fn lookup_of_an_unknown_user_is_not_found() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;

    let response = app
        .request(
            "GET",
            "/api/presence/ghost@example.com",
            None,
            Some(&admin.email),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn history_lists_transitions_newest_first() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    app.bring_online("worker@example.com").await;
    app.take_offline("worker@example.com").await;
    app.bring_online("worker@example.com").await;

    let response = app
        .request(
            "GET",
            "/api/presence/worker@example.com/history",
            None,
            Some(&admin.email),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let rows = response.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["status"], "online");
    assert_eq!(rows[1]["status"], "offline");
    assert_eq!(rows[2]["status"], "online");
    assert!(rows[0]["changed_at"].is_string());

    let limited = app
        .request(
            "GET",
            "/api/presence/worker@example.com/history?limit=2",
            None,
            Some(&admin.email),
        )
        .await;
    assert_eq!(limited.body["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn reconciliation_converges_on_the_registry() {
    let app = helpers::TestApp::new().await;
    let admin = app.seed_user("admin@example.com", UserRole::Admin).await;
    app.seed_user("worker@example.com", UserRole::Employee)
        .await;

    // The device is connected but the webhook never arrived.
    app.transport
        .connect(PRESENCE_GROUP, "worker@example.com");

    let report = app
        .request("POST", "/api/reconcile", None, Some(&admin.email))
        .await;
    assert_eq!(report.status, StatusCode::OK);
    assert_eq!(report.body["data"]["checked"], 2);
    assert_eq!(report.body["data"]["marked_online"], 1);
    assert_eq!(report.body["data"]["marked_offline"], 0);
    assert_eq!(report.body["data"]["failed"], 0);

    let presence = app
        .request(
            "GET",
            "/api/presence/worker@example.com",
            None,
            Some(&admin.email),
        )
        .await;
    assert_eq!(presence.body["data"]["status"], "online");

    // The connection dropped without a webhook; the next sweep heals it.
    app.transport
        .disconnect(PRESENCE_GROUP, "worker@example.com");

    let report = app
        .request("POST", "/api/reconcile", None, Some(&admin.email))
        .await;
    assert_eq!(report.body["data"]["marked_offline"], 1);

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
