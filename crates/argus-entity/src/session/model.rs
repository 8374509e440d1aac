//! Streaming session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Well-known stop reasons recorded when a session closes.
///
/// The column is free-form text so ad-hoc reasons can be recorded, but
/// these values cover every close the system performs itself.
pub mod stop_reason {
    /// Closed by an operator STOP command.
    pub const COMMAND: &str = "COMMAND";
    /// Closed because the device disconnected from the transport.
    pub const DISCONNECT: &str = "DISCONNECT";
    /// Closed because a newer session for the same user started.
    pub const SUPERSEDED: &str = "SUPERSEDED";
}

/// A live-view streaming session for a monitored user.
///
/// At most one open session (`stopped_at IS NULL`) exists per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StreamingSession {
    /// Unique session identifier.
    pub id: Uuid,
    /// The monitored user being streamed.
    pub user_id: Uuid,
    /// When streaming started.
    pub started_at: DateTime<Utc>,
    /// When streaming stopped, if it has.
    pub stopped_at: Option<DateTime<Utc>>,
    /// Why the session stopped (see [`stop_reason`]).
    pub stop_reason: Option<String>,
}

impl StreamingSession {
    /// Check whether the session is still open.
    pub fn is_open(&self) -> bool {
        self.stopped_at.is_none()
    }

    /// Session length in seconds, if the session has closed.
    pub fn duration_seconds(&self) -> Option<i64> {
        self.stopped_at
            .map(|stopped| (stopped - self.started_at).num_seconds().max(0))
    }
}
