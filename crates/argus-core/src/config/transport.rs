//! Realtime transport configuration.

use serde::{Deserialize, Serialize};

/// Realtime transport gateway configuration.
///
/// The transport is the external push service monitored devices and
/// operator dashboards connect to. Argus talks to it through a small
/// management API: publish a payload to a group or a single identity,
/// and list the identities currently connected to a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Transport provider type: `"rest"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the transport management API (rest provider).
    #[serde(default)]
    pub endpoint: String,
    /// Access key sent as `x-access-key` on management calls (rest provider).
    #[serde(default)]
    pub access_key: String,
    /// Timeout for management API calls in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_timeout() -> u64 {
    10
}
