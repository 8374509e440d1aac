//! Streaming session store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use argus_core::result::AppResult;
use argus_entity::session::StreamingSession;

/// Persistence for live-view streaming sessions.
///
/// The single-session invariant is enforced by the caller closing open
/// sessions before inserting a new one, and `close_open` acting on all
/// open rows so a duplicate left behind by a crash heals on the next
/// write.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new open session for a user.
    async fn insert(&self, user_id: Uuid, started_at: DateTime<Utc>)
    -> AppResult<StreamingSession>;

    /// Close every open session for a user, returning the closed rows.
    async fn close_open(
        &self,
        user_id: Uuid,
        reason: &str,
        stopped_at: DateTime<Utc>,
    ) -> AppResult<Vec<StreamingSession>>;

    /// Find the open session for a user, if any.
    async fn find_open(&self, user_id: Uuid) -> AppResult<Option<StreamingSession>>;

    /// Find the most recent session for a user, open or closed.
    async fn find_latest(&self, user_id: Uuid) -> AppResult<Option<StreamingSession>>;

    /// List every open session.
    async fn list_open(&self) -> AppResult<Vec<StreamingSession>>;

    /// List open sessions whose user reports to the given supervisor.
    async fn list_open_supervised_by(
        &self,
        supervisor_id: Uuid,
    ) -> AppResult<Vec<StreamingSession>>;
}
