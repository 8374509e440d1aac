use std::sync::Arc;

use argus_core::AppResult;
use argus_database::stores::SessionStore;
use argus_entity::session::{StreamingSession, stop_reason};
use argus_entity::user::{User, UserRole};
use argus_transport::{OutboundMessage, PublishTarget, StreamActivity, TransportGateway};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::RequestContext;

/// Controls live-view streaming sessions.
///
/// At most one session is open per user. Starting a new one first
/// closes whatever is still open, so a duplicate left behind by a crash
/// heals on the next start instead of accumulating.
#[derive(Debug, Clone)]
pub struct StreamingSessionManager {
    sessions: Arc<dyn SessionStore>,
    transport: Arc<dyn TransportGateway>,
}

impl StreamingSessionManager {
    pub fn new(sessions: Arc<dyn SessionStore>, transport: Arc<dyn TransportGateway>) -> Self {
        Self { sessions, transport }
    }

    /// Open a session for the target user.
    pub async fn start(&self, target: &User) -> AppResult<StreamingSession> {
        let now = Utc::now();
        let superseded = self
            .sessions
            .close_open(target.id, stop_reason::SUPERSEDED, now)
            .await?;
        if !superseded.is_empty() {
            info!(
                user_id = %target.id,
                count = superseded.len(),
                "Closed leftover open sessions before starting a new one"
            );
        }

        let session = self.sessions.insert(target.id, now).await?;
        info!(user_id = %target.id, session_id = %session.id, "Streaming session started");

        self.announce(target, StreamActivity::Started, None).await;
        Ok(session)
    }

    /// Close the target's open session, if any, recording why.
    pub async fn stop(&self, target: &User, reason: &str) -> AppResult<Option<StreamingSession>> {
        let closed = self.sessions.close_open(target.id, reason, Utc::now()).await?;
        let Some(latest) = closed.into_iter().max_by_key(|session| session.started_at) else {
            return Ok(None);
        };

        info!(
            user_id = %target.id,
            session_id = %latest.id,
            reason,
            "Streaming session stopped"
        );
        self.announce(target, StreamActivity::Stopped, Some(reason.to_string()))
            .await;
        Ok(Some(latest))
    }

    /// Whether the user has an open session.
    pub async fn is_active(&self, user_id: Uuid) -> AppResult<bool> {
        Ok(self.sessions.find_open(user_id).await?.is_some())
    }

    /// The user's most recent session, open or closed.
    pub async fn latest(&self, user_id: Uuid) -> AppResult<Option<StreamingSession>> {
        self.sessions.find_latest(user_id).await
    }

    /// List open sessions visible to the caller.
    ///
    /// Admins see every open session, supervisors the sessions of their
    /// supervisees, everyone else nothing.
    pub async fn list_active(&self, ctx: &RequestContext) -> AppResult<Vec<StreamingSession>> {
        match ctx.role {
            UserRole::SuperAdmin | UserRole::Admin => self.sessions.list_open().await,
            UserRole::Supervisor => self.sessions.list_open_supervised_by(ctx.user_id).await,
            UserRole::Employee => Ok(Vec::new()),
        }
    }

    /// Push a stream-status message to the target's own channel, the
    /// group supervisors watching that user subscribe to. Failures are
    /// logged, never surfaced; the session row is already settled.
    pub(crate) async fn announce(
        &self,
        target: &User,
        status: StreamActivity,
        reason: Option<String>,
    ) {
        let message = OutboundMessage::StreamStatus {
            email: target.email.clone(),
            status,
            reason,
            changed_at: Utc::now(),
        };
        let payload = match serde_json::to_value(&message) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to encode stream status payload");
                return;
            }
        };

        let channel = PublishTarget::group(target.email.as_str());
        if let Err(e) = self.transport.publish(&channel, &payload).await {
            warn!(error = %e, user_id = %target.id, "Failed to broadcast stream status");
        }
    }
}
