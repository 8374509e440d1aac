//! Presence record and history entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::PresenceStatus;

/// The persisted presence row for a user, one row per user.
///
/// Absence of a row means the user has never connected and is treated
/// as offline everywhere.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PresenceRecord {
    /// The user this record belongs to.
    pub user_id: Uuid,
    /// Current connectivity status.
    pub status: PresenceStatus,
    /// Last time the device was seen on the transport.
    pub last_seen_at: DateTime<Utc>,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

/// An append-only log entry recording a presence transition.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PresenceHistoryEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The user whose status changed.
    pub user_id: Uuid,
    /// The status the user transitioned to.
    pub status: PresenceStatus,
    /// When the transition happened.
    pub changed_at: DateTime<Utc>,
}

/// A user joined with their presence record, as shown on dashboards.
///
/// Users without a presence row surface with `status: None` and are
/// reported offline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserPresence {
    /// The user identifier.
    pub user_id: Uuid,
    /// Email address.
    pub email: String,
    /// Alternate identifier issued by the customer's own systems.
    pub external_id: Option<String>,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Persisted status, if the user ever connected.
    pub status: Option<PresenceStatus>,
    /// Last time the device was seen, if ever.
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl UserPresence {
    /// The status to report, treating a missing record as offline.
    pub fn effective_status(&self) -> PresenceStatus {
        self.status.unwrap_or(PresenceStatus::Offline)
    }

    /// Whether the user currently counts as online.
    pub fn is_online(&self) -> bool {
        self.effective_status().is_online()
    }
}
