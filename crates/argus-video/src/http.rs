//! HTTP video backend client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use argus_core::config::video::VideoConfig;
use argus_core::error::{AppError, ErrorKind};
use argus_core::result::AppResult;

use crate::provider::{RecordingStopSummary, VideoSessionProvider};

/// Client for a video backend exposing an HTTP control API.
#[derive(Clone)]
pub struct HttpVideoSessions {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
}

impl HttpVideoSessions {
    /// Create a new HTTP video client from configuration.
    pub fn new(config: &VideoConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Recording,
                    "Failed to build video HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
        })
    }
}

impl fmt::Debug for HttpVideoSessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // access_key stays out of logs
        f.debug_struct("HttpVideoSessions")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl VideoSessionProvider for HttpVideoSessions {
    async fn stop_all_recordings_for_user(
        &self,
        user_id: Uuid,
        sas_minutes: u32,
    ) -> AppResult<RecordingStopSummary> {
        let url = format!("{}/api/recordings/{user_id}/stop-all", self.endpoint);

        let response = self
            .client
            .post(url)
            .header("x-access-key", &self.access_key)
            .query(&[("sasMinutes", sas_minutes)])
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Recording,
                    format!("Failed to stop recordings for user {user_id}"),
                    e,
                )
            })?
            .error_for_status()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Recording,
                    format!("Video backend rejected recording stop for user {user_id}"),
                    e,
                )
            })?;

        let summary: RecordingStopSummary = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Recording,
                format!("Invalid recording stop response for user {user_id}"),
                e,
            )
        })?;

        Ok(summary)
    }
}
