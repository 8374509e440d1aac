//! REST transport gateway implementation.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use argus_core::config::transport::TransportConfig;
use argus_core::error::{AppError, ErrorKind};
use argus_core::result::AppResult;

use crate::gateway::{PublishTarget, TransportGateway};

/// Gateway to a realtime transport exposing an HTTP management API.
///
/// Publishes land on `POST /api/groups/{group}/messages` or
/// `POST /api/identities/{identity}/messages`; the connection registry
/// is read from `GET /api/groups/{group}/identities`, which returns a
/// JSON array of identity strings.
#[derive(Clone)]
pub struct RestTransportGateway {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
}

impl RestTransportGateway {
    /// Create a new REST gateway from configuration.
    pub fn new(config: &TransportConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::TransportUnavailable,
                    "Failed to build transport HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }
}

impl fmt::Debug for RestTransportGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // access_key stays out of logs
        f.debug_struct("RestTransportGateway")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TransportGateway for RestTransportGateway {
    async fn publish(
        &self,
        target: &PublishTarget,
        payload: &serde_json::Value,
    ) -> AppResult<()> {
        let path = match target {
            PublishTarget::Group(group) => format!("/api/groups/{group}/messages"),
            PublishTarget::Identity(identity) => format!("/api/identities/{identity}/messages"),
        };

        self.client
            .post(self.url(&path))
            .header("x-access-key", &self.access_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::TransportUnavailable,
                    format!("Failed to publish to {target}"),
                    e,
                )
            })?
            .error_for_status()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::TransportUnavailable,
                    format!("Transport rejected publish to {target}"),
                    e,
                )
            })?;

        Ok(())
    }

    async fn list_connected_identities(&self, group: &str) -> AppResult<Vec<String>> {
        let response = self
            .client
            .get(self.url(&format!("/api/groups/{group}/identities")))
            .header("x-access-key", &self.access_key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::TransportUnavailable,
                    format!("Failed to list identities in group '{group}'"),
                    e,
                )
            })?
            .error_for_status()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::TransportUnavailable,
                    format!("Transport rejected identity listing for group '{group}'"),
                    e,
                )
            })?;

        response.json::<Vec<String>>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::TransportUnavailable,
                format!("Invalid identity listing for group '{group}'"),
                e,
            )
        })
    }
}
