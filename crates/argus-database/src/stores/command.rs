//! Pending command store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use argus_core::result::AppResult;
use argus_entity::command::{NewCommand, PendingCommand};

/// Persistence for operator commands.
///
/// Commands are always inserted as `pending` before any delivery
/// attempt, so nothing is lost when the transport is down or the
/// target is offline.
#[async_trait]
pub trait CommandStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new command in the `pending` state.
    async fn insert(&self, command: NewCommand) -> AppResult<PendingCommand>;

    /// Mark a pending command as published.
    async fn mark_published(&self, id: Uuid, published_at: DateTime<Utc>) -> AppResult<()>;

    /// Mark a batch of pending commands as published.
    ///
    /// Commands already published or acknowledged are left untouched.
    async fn mark_published_many(
        &self,
        ids: &[Uuid],
        published_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Acknowledge a command on behalf of its target.
    ///
    /// Returns `None` when no command with this id is addressed to the
    /// given user. Acknowledging twice keeps the first acknowledgment
    /// time.
    async fn acknowledge(
        &self,
        id: Uuid,
        target_user_id: Uuid,
        acknowledged_at: DateTime<Utc>,
    ) -> AppResult<Option<PendingCommand>>;

    /// List unacknowledged commands for a user, oldest first.
    async fn list_outstanding_for(&self, user_id: Uuid) -> AppResult<Vec<PendingCommand>>;

    /// List the most recent commands for a user, newest first.
    async fn list_recent_for(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<PendingCommand>>;
}
