//! Presence tracking configuration.

use serde::{Deserialize, Serialize};

/// Presence tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Transport group whose membership is the connectivity ground truth.
    #[serde(default = "default_group")]
    pub group: String,
    /// Default number of history entries returned per user.
    #[serde(default = "default_history_limit")]
    pub history_limit: i64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            group: default_group(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_group() -> String {
    "presence".to_string()
}

fn default_history_limit() -> i64 {
    50
}
