//! Video session provider trait and construction.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use argus_core::config::video::VideoConfig;
use argus_core::error::AppError;
use argus_core::result::AppResult;

use crate::http::HttpVideoSessions;
use crate::noop::NoopVideoSessions;

/// What the video backend did with a stop-all request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingStopSummary {
    /// Recordings the backend finished and sealed.
    pub completed: u32,
    /// Recordings the backend found in progress for the user.
    pub total: u32,
}

/// Control surface of the video backend.
///
/// Failures surface as `Recording` errors; callers decide whether the
/// call is load-bearing or best-effort.
#[async_trait]
pub trait VideoSessionProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Stop every in-progress recording for a user.
    ///
    /// `sas_minutes` is how long the storage links minted for the
    /// sealed recordings stay valid.
    async fn stop_all_recordings_for_user(
        &self,
        user_id: Uuid,
        sas_minutes: u32,
    ) -> AppResult<RecordingStopSummary>;
}

/// Create the video session provider selected by configuration.
pub fn create_video_provider(config: &VideoConfig) -> AppResult<Arc<dyn VideoSessionProvider>> {
    match config.provider.as_str() {
        "http" => {
            info!(endpoint = %config.endpoint, "Initializing HTTP video session provider");
            Ok(Arc::new(HttpVideoSessions::new(config)?))
        }
        "disabled" => {
            info!("Video backend disabled; recording stops become no-ops");
            Ok(Arc::new(NoopVideoSessions))
        }
        other => Err(AppError::configuration(format!(
            "Unknown video provider: '{other}'. Supported: http, disabled"
        ))),
    }
}
