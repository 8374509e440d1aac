//! Command delivery status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery lifecycle of an operator command.
///
/// Commands are persisted before any delivery attempt, so a command
/// whose target is offline stays `Pending` until the device polls it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "command_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    /// Persisted, not yet pushed to the device.
    Pending,
    /// Pushed over the transport to an online device.
    Published,
    /// The device confirmed execution.
    Acknowledged,
}

impl CommandStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Published => "published",
            Self::Acknowledged => "acknowledged",
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
