//! No-op video provider for deployments without a video backend.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use argus_core::result::AppResult;

use crate::provider::{RecordingStopSummary, VideoSessionProvider};

/// Video provider that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVideoSessions;

#[async_trait]
impl VideoSessionProvider for NoopVideoSessions {
    async fn stop_all_recordings_for_user(
        &self,
        user_id: Uuid,
        _sas_minutes: u32,
    ) -> AppResult<RecordingStopSummary> {
        debug!(%user_id, "Video backend disabled; skipping recording stop");
        Ok(RecordingStopSummary::default())
    }
}
