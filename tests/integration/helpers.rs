//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use argus_api::AppState;
use argus_core::config::app::{CorsConfig, ServerConfig};
use argus_core::config::logging::LoggingConfig;
use argus_core::config::presence::PresenceConfig;
use argus_core::config::transport::TransportConfig;
use argus_core::config::video::VideoConfig;
use argus_core::config::worker::WorkerConfig;
use argus_core::config::{AppConfig, DatabaseConfig};
use argus_database::MemoryStore;
use argus_entity::user::{User, UserRole};
use argus_service::{
    CommandDispatcher, ConnectionEventHandler, IdentityResolver, PresenceCoordinator,
    ReconciliationSweep, StreamingSessionManager,
};
use argus_transport::MemoryTransportGateway;
use argus_video::NoopVideoSessions;

/// The transport group presence is tracked against in tests.
pub const PRESENCE_GROUP: &str = "presence";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory store backing every repository trait
    pub store: Arc<MemoryStore>,
    /// In-memory transport; drive its registry with connect/disconnect
    pub transport: Arc<MemoryTransportGateway>,
}

impl TestApp {
    /// Create a new test application over in-memory backends
    pub async fn new() -> Self {
        let config = test_config();

        let store = Arc::new(MemoryStore::new());
        let transport = Arc::new(MemoryTransportGateway::new());

        let resolver = IdentityResolver::new(store.clone());
        let streaming = StreamingSessionManager::new(store.clone(), transport.clone());
        let coordinator = PresenceCoordinator::new(
            store.clone(),
            streaming.clone(),
            Arc::new(NoopVideoSessions),
            transport.clone(),
            config.presence.group.clone(),
            config.video.sas_minutes,
        );
        let reconciler = ReconciliationSweep::new(
            store.clone(),
            coordinator.clone(),
            transport.clone(),
            config.presence.group.clone(),
        );
        let events = ConnectionEventHandler::new(
            resolver.clone(),
            coordinator.clone(),
            reconciler.clone(),
        );
        let dispatcher = CommandDispatcher::new(
            store.clone(),
            resolver.clone(),
            coordinator.clone(),
            streaming.clone(),
            transport.clone(),
        );

        let state = AppState {
            config: Arc::new(config),
            users: store.clone(),
            resolver,
            events,
            coordinator,
            reconciler,
            streaming,
            dispatcher,
        };

        let router = argus_api::build_router(state);

        Self {
            router,
            store,
            transport,
        }
    }

    /// Seed a user and return it
    pub async fn seed_user(&self, email: &str, role: UserRole) -> User {
        self.seed_supervised(email, role, None).await
    }

    /// Seed a user reporting to the given supervisor
    pub async fn seed_supervised(
        &self,
        email: &str,
        role: UserRole,
        supervisor_id: Option<Uuid>,
    ) -> User {
        let now = chrono::Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            external_id: None,
            display_name: None,
            role,
            supervisor_id,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.store.add_user(user.clone()).await;
        user
    }

    /// Register the identity in the transport group and deliver the
    /// connect webhook, the way a real device coming online does
    pub async fn bring_online(&self, email: &str) {
        self.transport.connect(PRESENCE_GROUP, email);
        let response = self
            .request(
                "POST",
                "/api/events",
                Some(serde_json::json!({
                    "userId": email,
                    "eventType": "system",
                    "eventName": "connected",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["status"], "ok", "{:?}", response.body);
    }

    /// Drop the identity from the transport group and deliver the
    /// disconnect webhook
    pub async fn take_offline(&self, email: &str) {
        self.transport.disconnect(PRESENCE_GROUP, email);
        let response = self
            .request(
                "POST",
                "/api/events",
                Some(serde_json::json!({
                    "userId": email,
                    "eventType": "disconnected",
                    "eventName": "notification",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["status"], "ok", "{:?}", response.body);
    }

    /// Make an HTTP request to the test app, acting as the given user key
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        acting_as: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.request_raw(method, path, body_str, acting_as).await
    }

    /// Same as [`request`], but the body goes out exactly as given
    ///
    /// [`request`]: TestApp::request
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: impl Into<String>,
        acting_as: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(key) = acting_as {
            req = req.header("x-argus-user", key);
        }

        let req = req
            .body(Body::from(body.into()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig::default(),
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        transport: TransportConfig {
            provider: "memory".to_string(),
            endpoint: String::new(),
            access_key: String::new(),
            timeout_seconds: 1,
        },
        video: VideoConfig {
            provider: "disabled".to_string(),
            endpoint: String::new(),
            access_key: String::new(),
            timeout_seconds: 1,
            sas_minutes: 60,
        },
        presence: PresenceConfig {
            group: PRESENCE_GROUP.to_string(),
            history_limit: 50,
        },
        worker: WorkerConfig {
            enabled: false,
            reconcile_schedule: "0 * * * * *".to_string(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
    }
}
