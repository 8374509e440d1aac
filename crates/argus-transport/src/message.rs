//! Outbound message type definitions.
//!
//! Every payload Argus pushes through the transport is one of these
//! variants, tagged with a `type` field so devices and dashboards can
//! route on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use argus_entity::command::CommandKind;
use argus_entity::presence::PresenceStatus;

/// What a stream-status broadcast is announcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamActivity {
    /// A session row was opened.
    Started,
    /// A session row was closed.
    Stopped,
    /// A START command was issued and the device has not acted yet.
    Pending,
}

/// Messages pushed by Argus to transport clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// A user's connectivity changed; broadcast to the presence group.
    PresenceChanged {
        /// The user's email.
        email: String,
        /// Display name, if set.
        display_name: Option<String>,
        /// The new status.
        status: PresenceStatus,
        /// When the change was recorded.
        changed_at: DateTime<Utc>,
    },
    /// Streaming activity changed; broadcast to the user's own channel,
    /// which supervisors watching that user subscribe to.
    StreamStatus {
        /// The monitored user's email.
        email: String,
        /// What happened to the stream.
        status: StreamActivity,
        /// Why the session closed, when one did.
        reason: Option<String>,
        /// When the change was recorded.
        changed_at: DateTime<Utc>,
    },
    /// An operator command; pushed to the target's identity channel.
    Command {
        /// Command id, echoed back in the acknowledgment.
        id: Uuid,
        /// The control to execute.
        command: CommandKind,
        /// Free-form reason supplied by the operator.
        reason: Option<String>,
        /// Email of the operator who issued it.
        initiated_by: Option<String>,
        /// When the command was persisted.
        issued_at: DateTime<Utc>,
    },
}
