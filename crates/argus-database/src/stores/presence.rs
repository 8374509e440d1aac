//! Presence store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use argus_core::result::AppResult;
use argus_entity::presence::{PresenceHistoryEntry, PresenceRecord, PresenceStatus};

/// Persistence for presence records and their transition history.
#[async_trait]
pub trait PresenceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find the presence record for a user, if one exists.
    async fn find(&self, user_id: Uuid) -> AppResult<Option<PresenceRecord>>;

    /// Insert or overwrite the presence record for a user.
    ///
    /// Applying the same status twice must converge on the same row,
    /// so repeated transport events stay harmless.
    async fn upsert(
        &self,
        user_id: Uuid,
        status: PresenceStatus,
        seen_at: DateTime<Utc>,
    ) -> AppResult<PresenceRecord>;

    /// Refresh `last_seen_at` without changing status.
    ///
    /// Only applies while the user is online; a touch for an offline or
    /// unknown user is a no-op.
    async fn touch(&self, user_id: Uuid, seen_at: DateTime<Utc>) -> AppResult<()>;

    /// Append one transition to the history log.
    async fn append_history(
        &self,
        user_id: Uuid,
        status: PresenceStatus,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// List the most recent transitions for a user, newest first.
    async fn history_for(&self, user_id: Uuid, limit: i64)
    -> AppResult<Vec<PresenceHistoryEntry>>;
}
