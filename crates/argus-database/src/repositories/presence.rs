//! Presence repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use argus_core::error::{AppError, ErrorKind};
use argus_core::result::AppResult;
use argus_entity::presence::{PresenceHistoryEntry, PresenceRecord, PresenceStatus};

use crate::stores::PresenceStore;

/// PostgreSQL-backed presence store.
#[derive(Debug, Clone)]
pub struct PresenceRepository {
    pool: PgPool,
}

impl PresenceRepository {
    /// Create a new presence repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PresenceStore for PresenceRepository {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<PresenceRecord>> {
        sqlx::query_as::<_, PresenceRecord>("SELECT * FROM presence_records WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find presence record", e)
            })
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        status: PresenceStatus,
        seen_at: DateTime<Utc>,
    ) -> AppResult<PresenceRecord> {
        sqlx::query_as::<_, PresenceRecord>(
            "INSERT INTO presence_records (user_id, status, last_seen_at, updated_at)
             VALUES ($1, $2, $3, $3)
             ON CONFLICT (user_id) DO UPDATE
             SET status = EXCLUDED.status,
                 last_seen_at = EXCLUDED.last_seen_at,
                 updated_at = EXCLUDED.updated_at
             RETURNING *",
        )
        .bind(user_id)
        .bind(status)
        .bind(seen_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert presence record", e)
        })
    }

    async fn touch(&self, user_id: Uuid, seen_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "UPDATE presence_records SET last_seen_at = $2, updated_at = $2
             WHERE user_id = $1 AND status = 'online'",
        )
        .bind(user_id)
        .bind(seen_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to touch presence record", e)
        })?;
        Ok(())
    }

    async fn append_history(
        &self,
        user_id: Uuid,
        status: PresenceStatus,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO presence_history (user_id, status, changed_at) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(status)
        .bind(changed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append presence history", e)
        })?;
        Ok(())
    }

    async fn history_for(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<PresenceHistoryEntry>> {
        sqlx::query_as::<_, PresenceHistoryEntry>(
            "SELECT * FROM presence_history WHERE user_id = $1
             ORDER BY changed_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list presence history", e)
        })
    }
}
