use std::sync::Arc;

use argus_core::AppResult;
use argus_database::stores::PresenceStore;
use argus_entity::presence::{PresenceHistoryEntry, PresenceRecord, PresenceStatus};
use argus_entity::session::stop_reason;
use argus_entity::user::User;
use argus_transport::{OutboundMessage, PublishTarget, TransportGateway};
use argus_video::VideoSessionProvider;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::streaming::StreamingSessionManager;

/// Owns presence transitions.
///
/// Every connectivity change funnels through here, whether it came from
/// a transport lifecycle event or from the reconciliation sweep, so the
/// store write, the history entry, the broadcast, and the offline
/// cleanup always happen in the same order. The store write settles
/// before anything leaves the process.
#[derive(Debug, Clone)]
pub struct PresenceCoordinator {
    presence: Arc<dyn PresenceStore>,
    streaming: StreamingSessionManager,
    video: Arc<dyn VideoSessionProvider>,
    transport: Arc<dyn TransportGateway>,
    group: String,
    sas_minutes: u32,
}

impl PresenceCoordinator {
    pub fn new(
        presence: Arc<dyn PresenceStore>,
        streaming: StreamingSessionManager,
        video: Arc<dyn VideoSessionProvider>,
        transport: Arc<dyn TransportGateway>,
        group: impl Into<String>,
        sas_minutes: u32,
    ) -> Self {
        Self {
            presence,
            streaming,
            video,
            transport,
            group: group.into(),
            sas_minutes,
        }
    }

    /// Mark a user online.
    pub async fn set_online(
        &self,
        user: &User,
        seen_at: DateTime<Utc>,
    ) -> AppResult<PresenceRecord> {
        self.apply(user, PresenceStatus::Online, seen_at).await
    }

    /// Mark a user offline and run the offline cleanup.
    ///
    /// Any open streaming session closes with reason `disconnect` and
    /// the video provider is asked to stop recordings. The cleanup runs
    /// even when the user was already offline, so a session orphaned by
    /// a crash heals on the next disconnect.
    pub async fn set_offline(
        &self,
        user: &User,
        seen_at: DateTime<Utc>,
    ) -> AppResult<PresenceRecord> {
        let record = self.apply(user, PresenceStatus::Offline, seen_at).await?;

        self.streaming.stop(user, stop_reason::DISCONNECT).await?;

        match self
            .video
            .stop_all_recordings_for_user(user.id, self.sas_minutes)
            .await
        {
            Ok(summary) if summary.total > 0 => {
                info!(
                    user_id = %user.id,
                    completed = summary.completed,
                    total = summary.total,
                    "Stopped in-progress recordings on disconnect"
                );
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "Failed to stop recordings on disconnect");
            }
        }

        Ok(record)
    }

    /// Refresh `last_seen_at` without changing status. A touch for an
    /// offline or unknown user is a no-op.
    pub async fn touch(&self, user_id: Uuid, seen_at: DateTime<Utc>) -> AppResult<()> {
        self.presence.touch(user_id, seen_at).await
    }

    /// Current status for a user. No record means offline.
    pub async fn get_status(&self, user_id: Uuid) -> AppResult<PresenceStatus> {
        Ok(self
            .presence
            .find(user_id)
            .await?
            .map(|record| record.status)
            .unwrap_or(PresenceStatus::Offline))
    }

    /// The stored presence record, if the user has ever connected.
    pub async fn find(&self, user_id: Uuid) -> AppResult<Option<PresenceRecord>> {
        self.presence.find(user_id).await
    }

    /// Recent transitions for a user, newest first.
    pub async fn history(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<PresenceHistoryEntry>> {
        self.presence.history_for(user_id, limit).await
    }

    /// Write the record, then log and announce the transition.
    ///
    /// The history entry and the broadcast only happen when the
    /// effective status actually changed, so repeated events for the
    /// same state stay quiet.
    async fn apply(
        &self,
        user: &User,
        status: PresenceStatus,
        seen_at: DateTime<Utc>,
    ) -> AppResult<PresenceRecord> {
        let previous = self
            .presence
            .find(user.id)
            .await?
            .map(|record| record.status)
            .unwrap_or(PresenceStatus::Offline);
        let record = self.presence.upsert(user.id, status, seen_at).await?;

        if previous == status {
            debug!(user_id = %user.id, status = %status, "Presence unchanged");
            return Ok(record);
        }

        self.presence.append_history(user.id, status, seen_at).await?;
        info!(user_id = %user.id, email = %user.email, status = %status, "Presence changed");

        let message = OutboundMessage::PresenceChanged {
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            status,
            changed_at: seen_at,
        };
        match serde_json::to_value(&message) {
            Ok(payload) => {
                let group = PublishTarget::group(self.group.as_str());
                if let Err(e) = self.transport.publish(&group, &payload).await {
                    warn!(error = %e, user_id = %user.id, "Failed to broadcast presence change");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode presence payload"),
        }

        Ok(record)
    }
}
