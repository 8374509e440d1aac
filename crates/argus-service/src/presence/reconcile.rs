use std::collections::HashSet;
use std::sync::Arc;

use argus_core::AppResult;
use argus_database::stores::UserDirectory;
use argus_entity::presence::{PresenceStatus, UserPresence};
use argus_transport::TransportGateway;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::presence::PresenceCoordinator;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SweepReport {
    /// Users compared against the registry.
    pub checked: usize,
    /// Users the registry showed connected but the store had offline.
    pub marked_online: usize,
    /// Users the store had online but the registry no longer lists.
    pub marked_offline: usize,
    /// Users whose correction failed. The sweep keeps going.
    pub failed: usize,
}

impl SweepReport {
    /// Whether the pass changed or failed to change anything.
    pub fn has_changes(&self) -> bool {
        self.marked_online > 0 || self.marked_offline > 0 || self.failed > 0
    }
}

/// Converges the presence store on the transport's connection registry.
///
/// The registry is ground truth: webhook deliveries get lost, processes
/// restart, and the store drifts. Every active user is compared against
/// the registry, and each correction runs the same transition routine
/// as an event-driven change, offline cleanup included. Registry
/// identities that match no active user are ignored.
#[derive(Debug, Clone)]
pub struct ReconciliationSweep {
    users: Arc<dyn UserDirectory>,
    coordinator: PresenceCoordinator,
    transport: Arc<dyn TransportGateway>,
    group: String,
}

impl ReconciliationSweep {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        coordinator: PresenceCoordinator,
        transport: Arc<dyn TransportGateway>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            users,
            coordinator,
            transport,
            group: group.into(),
        }
    }

    /// Run one pass. Fails only when the registry or the user listing
    /// is unavailable; per-user corrections are logged and counted.
    pub async fn run(&self) -> AppResult<SweepReport> {
        let connected: HashSet<String> = self
            .transport
            .list_connected_identities(&self.group)
            .await?
            .into_iter()
            .map(|identity| identity.to_lowercase())
            .collect();

        let rows = self.users.list_active_with_presence().await?;
        let mut report = SweepReport {
            checked: rows.len(),
            ..SweepReport::default()
        };
        let now = Utc::now();

        for row in rows {
            let desired = if Self::is_connected(&connected, &row) {
                PresenceStatus::Online
            } else {
                PresenceStatus::Offline
            };
            if row.effective_status() == desired {
                continue;
            }

            match self.correct(&row, desired, now).await {
                Ok(true) if desired.is_online() => report.marked_online += 1,
                Ok(true) => report.marked_offline += 1,
                // The user vanished between the listing and the correction.
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, user_id = %row.user_id, "Failed to reconcile presence");
                    report.failed += 1;
                }
            }
        }

        if report.has_changes() {
            info!(
                checked = report.checked,
                marked_online = report.marked_online,
                marked_offline = report.marked_offline,
                failed = report.failed,
                "Reconciliation sweep applied corrections"
            );
        }
        Ok(report)
    }

    /// A user counts as connected when any identity they authenticate
    /// with appears in the registry.
    fn is_connected(connected: &HashSet<String>, row: &UserPresence) -> bool {
        connected.contains(&row.email.to_lowercase())
            || row
                .external_id
                .as_ref()
                .is_some_and(|id| connected.contains(&id.to_lowercase()))
            || connected.contains(&row.user_id.to_string())
    }

    async fn correct(
        &self,
        row: &UserPresence,
        desired: PresenceStatus,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let Some(user) = self.users.find_by_id(row.user_id).await? else {
            return Ok(false);
        };
        match desired {
            PresenceStatus::Online => self.coordinator.set_online(&user, now).await?,
            PresenceStatus::Offline => self.coordinator.set_offline(&user, now).await?,
        };
        Ok(true)
    }
}
