//! In-memory transport for single-node development and tests.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use argus_core::result::AppResult;

use crate::gateway::{PublishTarget, TransportGateway};

/// A payload captured by the in-memory transport.
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    /// Where the payload was addressed.
    pub target: PublishTarget,
    /// The payload itself.
    pub payload: serde_json::Value,
}

/// In-memory transport gateway.
///
/// Group membership is driven by hand through [`connect`] and
/// [`disconnect`], standing in for the registry a real transport
/// maintains. Published payloads are captured in order for inspection.
///
/// [`connect`]: MemoryTransportGateway::connect
/// [`disconnect`]: MemoryTransportGateway::disconnect
#[derive(Debug, Default)]
pub struct MemoryTransportGateway {
    /// Group name → connected identities.
    groups: DashMap<String, HashSet<String>>,
    /// Every payload published, in publish order.
    published: Mutex<Vec<PublishedMessage>>,
}

impl MemoryTransportGateway {
    /// Create an empty in-memory transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identity as connected to a group.
    pub fn connect(&self, group: &str, identity: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(identity.to_string());
    }

    /// Remove an identity from a group.
    pub fn disconnect(&self, group: &str, identity: &str) {
        if let Some(mut members) = self.groups.get_mut(group) {
            members.remove(identity);
        }
    }

    /// Snapshot of every payload published so far.
    pub async fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().await.clone()
    }
}

#[async_trait]
impl TransportGateway for MemoryTransportGateway {
    async fn publish(
        &self,
        target: &PublishTarget,
        payload: &serde_json::Value,
    ) -> AppResult<()> {
        self.published.lock().await.push(PublishedMessage {
            target: target.clone(),
            payload: payload.clone(),
        });
        Ok(())
    }

    async fn list_connected_identities(&self, group: &str) -> AppResult<Vec<String>> {
        let mut identities: Vec<String> = self
            .groups
            .get(group)
            .map(|entry| entry.value().iter().cloned().collect())
            .unwrap_or_default();
        identities.sort();
        Ok(identities)
    }
}
