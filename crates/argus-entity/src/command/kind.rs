//! Command kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The monitoring controls an operator can send to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "command_kind", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandKind {
    /// Begin screen streaming.
    Start,
    /// End screen streaming.
    Stop,
    /// Re-read configuration and restart capture.
    Refresh,
}

impl CommandKind {
    /// Return the command as the uppercase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Stop => "STOP",
            Self::Refresh => "REFRESH",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = argus_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "START" => Ok(Self::Start),
            "STOP" => Ok(Self::Stop),
            "REFRESH" => Ok(Self::Refresh),
            _ => Err(argus_core::AppError::validation(format!(
                "Invalid command: '{s}'. Expected one of: START, STOP, REFRESH"
            ))),
        }
    }
}
