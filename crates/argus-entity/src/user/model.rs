//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user in the Argus system.
///
/// Both monitored employees and the operators watching them are users.
/// Devices authenticate against the realtime transport with the user's
/// email or external id, so either value may arrive as a connection
/// identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address, unique across active users.
    pub email: String,
    /// Alternate identifier issued by the customer's own systems.
    pub external_id: Option<String>,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// User role in the monitoring hierarchy.
    pub role: UserRole,
    /// The supervisor responsible for this user (employees only).
    pub supervisor_id: Option<Uuid>,
    /// Soft-delete marker. Deleted users never resolve from events.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the user has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if this user supervises the given user.
    pub fn supervises(&self, other: &User) -> bool {
        other.supervisor_id == Some(self.id)
    }

    /// Name used in outbound payloads, falling back to the email.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}
