//! Video backend configuration.

use serde::{Deserialize, Serialize};

/// Video backend configuration.
///
/// The video backend owns recording sessions for monitored devices.
/// Argus only ever asks it to stop the recordings of a user whose
/// device dropped off the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Video provider type: `"http"` or `"disabled"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the video backend API (http provider).
    #[serde(default)]
    pub endpoint: String,
    /// Access key sent as `x-access-key` on API calls (http provider).
    #[serde(default)]
    pub access_key: String,
    /// Timeout for video backend calls in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Validity in minutes of the storage links minted when a
    /// recording is sealed by a stop-all call.
    #[serde(default = "default_sas_minutes")]
    pub sas_minutes: u32,
}

fn default_provider() -> String {
    "disabled".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_sas_minutes() -> u32 {
    60
}
