use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use argus_core::{AppError, AppResult};
use argus_entity::user::{User, UserRole};
use argus_transport::{PublishTarget, TransportGateway};
use argus_video::{RecordingStopSummary, VideoSessionProvider};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

pub fn user_with_role(email: &str, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        external_id: None,
        display_name: None,
        role,
        supervisor_id: None,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn employee(email: &str) -> User {
    user_with_role(email, UserRole::Employee)
}

pub fn supervisor(email: &str) -> User {
    user_with_role(email, UserRole::Supervisor)
}

pub fn admin(email: &str) -> User {
    user_with_role(email, UserRole::Admin)
}

/// Gateway double whose publishes always fail.
#[derive(Debug, Default)]
pub struct FailingTransport;

#[async_trait]
impl TransportGateway for FailingTransport {
    async fn publish(&self, target: &PublishTarget, _payload: &serde_json::Value) -> AppResult<()> {
        Err(AppError::transport_unavailable(format!(
            "Transport down, cannot reach {target}"
        )))
    }

    async fn list_connected_identities(&self, _group: &str) -> AppResult<Vec<String>> {
        Err(AppError::transport_unavailable(
            "Transport down, cannot list identities",
        ))
    }
}

/// Video provider double that counts stop requests.
#[derive(Debug, Default)]
pub struct CountingVideoSessions {
    stops: AtomicU64,
}

impl CountingVideoSessions {
    pub fn stop_count(&self) -> u64 {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoSessionProvider for CountingVideoSessions {
    async fn stop_all_recordings_for_user(
        &self,
        _user_id: Uuid,
        _sas_minutes: u32,
    ) -> AppResult<RecordingStopSummary> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(RecordingStopSummary {
            completed: 1,
            total: 1,
        })
    }
}

pub fn counting_video() -> Arc<CountingVideoSessions> {
    Arc::new(CountingVideoSessions::default())
}
