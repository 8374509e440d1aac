//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Command dispatch request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchCommandRequest {
    /// Command to send: `START`, `STOP`, or `REFRESH`.
    pub command: String,
    /// Target user email.
    pub target_email: String,
    /// Optional free-form reason, recorded and forwarded to the device.
    pub reason: Option<String>,
}

/// Query parameters for presence history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryParams {
    /// Maximum entries returned; the configured default applies when absent.
    pub limit: Option<i64>,
}

/// Query parameters for the recent-commands listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentCommandsParams {
    /// Target user key: id, external id, or email.
    pub target_email: String,
    /// Maximum entries returned (default: 50, max: 100).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}
