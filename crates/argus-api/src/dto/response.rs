//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use argus_entity::command::{CommandKind, CommandStatus, PendingCommand};
use argus_entity::presence::{PresenceHistoryEntry, PresenceStatus, UserPresence};
use argus_entity::session::StreamingSession;
use argus_service::DispatchOutcome;
use argus_transport::EventPhase;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Acknowledgment body for the transport webhook.
///
/// The webhook answers HTTP 200 no matter what happened; this body is
/// the only place an outcome shows. `phase` is set on success,
/// `message` on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAck {
    /// `"ok"` or `"error"`.
    pub status: String,
    /// Normalized phase, when handling succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// What went wrong, when it did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EventAck {
    /// A successful acknowledgment carrying the normalized phase.
    pub fn ok(phase: EventPhase) -> Self {
        Self {
            status: "ok".to_string(),
            phase: Some(phase.as_str().to_string()),
            message: None,
        }
    }

    /// A failure acknowledgment; still delivered with HTTP 200.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            phase: None,
            message: Some(message.into()),
        }
    }
}

/// Dispatch outcome on the wire.
///
/// Field names and the capitalized status strings are pinned by the
/// dashboard client; everything else in the API keeps snake_case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    /// Whether the command reached a live connection.
    pub delivered: bool,
    /// Persisted command id.
    pub command_id: Uuid,
    /// `"Published"` or `"Pending"`.
    pub status: String,
}

impl From<DispatchOutcome> for DispatchResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        let status = match outcome.command.status {
            CommandStatus::Pending => "Pending",
            CommandStatus::Published => "Published",
            CommandStatus::Acknowledged => "Acknowledged",
        };
        Self {
            delivered: outcome.delivered,
            command_id: outcome.command.id,
            status: status.to_string(),
        }
    }
}

/// A command as shown to devices and operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Command id.
    pub id: Uuid,
    /// The control being sent.
    pub command: CommandKind,
    /// Delivery lifecycle state.
    pub status: CommandStatus,
    /// Operator-supplied reason.
    pub reason: Option<String>,
    /// When the command was persisted.
    pub created_at: DateTime<Utc>,
    /// When the command was pushed over the transport, if it was.
    pub published_at: Option<DateTime<Utc>>,
    /// When the device confirmed execution, if it did.
    pub acknowledged_at: Option<DateTime<Utc>>,
}

impl From<PendingCommand> for CommandResponse {
    fn from(command: PendingCommand) -> Self {
        Self {
            id: command.id,
            command: command.command,
            status: command.status,
            reason: command.reason,
            created_at: command.created_at,
            published_at: command.published_at,
            acknowledged_at: command.acknowledged_at,
        }
    }
}

/// A user with their effective presence, as listed on dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPresenceResponse {
    /// User id.
    pub user_id: Uuid,
    /// Email address.
    pub email: String,
    /// External directory id, if any.
    pub external_id: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Effective status; a user who never connected reports offline.
    pub status: PresenceStatus,
    /// Last sighting on the transport, if any.
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl From<UserPresence> for UserPresenceResponse {
    fn from(row: UserPresence) -> Self {
        let status = row.effective_status();
        Self {
            user_id: row.user_id,
            email: row.email,
            external_id: row.external_id,
            display_name: row.display_name,
            status,
            last_seen_at: row.last_seen_at,
        }
    }
}

/// Resolved presence for a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceResponse {
    /// User id.
    pub user_id: Uuid,
    /// Email address.
    pub email: String,
    /// Effective status.
    pub status: PresenceStatus,
    /// Last sighting on the transport, if any.
    pub last_seen_at: Option<DateTime<Utc>>,
}

/// One presence transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryResponse {
    /// The status the user transitioned to.
    pub status: PresenceStatus,
    /// When the transition happened.
    pub changed_at: DateTime<Utc>,
}

impl From<PresenceHistoryEntry> for HistoryEntryResponse {
    fn from(entry: PresenceHistoryEntry) -> Self {
        Self {
            status: entry.status,
            changed_at: entry.changed_at,
        }
    }
}

/// A streaming session, open or closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session id.
    pub id: Uuid,
    /// The monitored user being streamed.
    pub user_id: Uuid,
    /// When streaming started.
    pub started_at: DateTime<Utc>,
    /// When streaming stopped, if it has.
    pub stopped_at: Option<DateTime<Utc>>,
    /// Why the session stopped.
    pub stop_reason: Option<String>,
}

impl From<StreamingSession> for SessionResponse {
    fn from(session: StreamingSession) -> Self {
        Self {
            id: session.id,
            user_id: session.user_id,
            started_at: session.started_at,
            stopped_at: session.stopped_at,
            stop_reason: session.stop_reason,
        }
    }
}
