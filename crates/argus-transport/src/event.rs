//! Connection lifecycle events and their normalization.
//!
//! The transport posts lifecycle events in two encodings, depending on
//! which side of its broker emitted them:
//!
//! * system mode: `eventType` holds the literal `"system"` and the
//!   phase is carried in `eventName`;
//! * broker mode: the phase is carried in `eventType` and `eventName`
//!   holds a routing label such as `"notification"`.
//!
//! [`ConnectionEvent::normalize`] folds both encodings into one
//! [`NormalizedEvent`]. Unrecognized phases normalize to
//! [`EventPhase::Unknown`]; they are never an error.

use serde::{Deserialize, Serialize};

/// Literal `eventType` marking a system-mode event.
const TYPE_SYSTEM: &str = "system";

/// A connection lifecycle event as posted by the transport webhook.
///
/// The wire format is camelCase: `{userId, eventType?, eventName?,
/// connectionId?, hub?}`. Every field except `userId` may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionEvent {
    /// The connection identity (a user's email, external id, or id).
    pub user_id: String,
    /// Phase carrier in broker mode, `"system"` in system mode.
    pub event_type: String,
    /// Phase carrier in system mode, routing label in broker mode.
    pub event_name: String,
    /// Transport-assigned connection id, if the gateway sent one.
    pub connection_id: Option<String>,
    /// Hub name the connection belongs to, if the gateway sent one.
    pub hub: Option<String>,
}

/// The lifecycle phase of a normalized connection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPhase {
    /// A device connected to the transport.
    Connect,
    /// A device dropped off the transport.
    Disconnected,
    /// An application-level keepalive from a connected device.
    Custom,
    /// Anything this version does not recognize.
    Unknown,
}

impl EventPhase {
    /// Lower-case name, used in acknowledgment bodies and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventPhase::Connect => "connect",
            EventPhase::Disconnected => "disconnected",
            EventPhase::Custom => "custom",
            EventPhase::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EventPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A connection event with the phase extracted from either encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    /// The connection identity, trimmed.
    pub identity: String,
    /// The extracted lifecycle phase.
    pub phase: EventPhase,
    /// The raw phase label, kept for logging unknown phases.
    pub label: String,
}

impl ConnectionEvent {
    /// Fold the two wire encodings into a [`NormalizedEvent`].
    pub fn normalize(&self) -> NormalizedEvent {
        let event_type = self.event_type.trim().to_lowercase();
        let event_name = self.event_name.trim().to_lowercase();

        let label = if event_type.is_empty() || event_type == TYPE_SYSTEM {
            event_name
        } else {
            event_type
        };

        let phase = match label.as_str() {
            "connect" | "connected" => EventPhase::Connect,
            "disconnected" => EventPhase::Disconnected,
            "custom" => EventPhase::Custom,
            _ => EventPhase::Unknown,
        };

        NormalizedEvent {
            identity: self.user_id.trim().to_string(),
            phase,
            label,
        }
    }
}
