//! Transport gateway trait and publish addressing.

use std::fmt;

use async_trait::async_trait;

use argus_core::result::AppResult;

/// Addressing for an outbound publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    /// Every connection subscribed to the named group.
    Group(String),
    /// Every connection authenticated as the given identity.
    Identity(String),
}

impl PublishTarget {
    /// Target a named group.
    pub fn group(name: impl Into<String>) -> Self {
        Self::Group(name.into())
    }

    /// Target a single connection identity.
    pub fn identity(identity: impl Into<String>) -> Self {
        Self::Identity(identity.into())
    }
}

impl fmt::Display for PublishTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(name) => write!(f, "group:{name}"),
            Self::Identity(identity) => write!(f, "identity:{identity}"),
        }
    }
}

/// Management API of the external realtime transport.
///
/// The transport owns every device and dashboard connection; Argus only
/// pushes payloads through it and reads its connection registry. All
/// errors surface as `TransportUnavailable` so callers can decide
/// whether delivery is best-effort or load-bearing.
#[async_trait]
pub trait TransportGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Publish a JSON payload to a group or a single identity.
    async fn publish(&self, target: &PublishTarget, payload: &serde_json::Value)
    -> AppResult<()>;

    /// List the identities currently connected to a group.
    ///
    /// This registry is the ground truth the reconciliation sweep
    /// converges the presence store towards.
    async fn list_connected_identities(&self, group: &str) -> AppResult<Vec<String>>;
}
