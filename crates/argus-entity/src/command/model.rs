//! Pending command entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::CommandKind;
use super::status::CommandStatus;

/// A persisted operator command addressed to a monitored device.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PendingCommand {
    /// Unique command identifier.
    pub id: Uuid,
    /// The control being sent.
    pub command: CommandKind,
    /// Delivery lifecycle state.
    pub status: CommandStatus,
    /// The user whose device must execute the command.
    pub target_user_id: Uuid,
    /// The operator who issued the command, if any.
    pub initiated_by: Option<Uuid>,
    /// Free-form reason supplied by the operator.
    pub reason: Option<String>,
    /// When the command was persisted.
    pub created_at: DateTime<Utc>,
    /// When the command was pushed over the transport, if it was.
    pub published_at: Option<DateTime<Utc>>,
    /// When the device confirmed execution, if it did.
    pub acknowledged_at: Option<DateTime<Utc>>,
}

impl PendingCommand {
    /// Check whether the device still owes an acknowledgment.
    pub fn is_outstanding(&self) -> bool {
        self.status != CommandStatus::Acknowledged
    }
}

/// Data required to persist a new command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommand {
    /// The control being sent.
    pub command: CommandKind,
    /// The user whose device must execute the command.
    pub target_user_id: Uuid,
    /// The operator who issued the command, if any.
    pub initiated_by: Option<Uuid>,
    /// Free-form reason supplied by the operator.
    pub reason: Option<String>,
}
