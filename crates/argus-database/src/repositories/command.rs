//! Pending command repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use argus_core::error::{AppError, ErrorKind};
use argus_core::result::AppResult;
use argus_entity::command::{NewCommand, PendingCommand};

use crate::stores::CommandStore;

/// PostgreSQL-backed pending command store.
#[derive(Debug, Clone)]
pub struct CommandRepository {
    pool: PgPool,
}

impl CommandRepository {
    /// Create a new command repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommandStore for CommandRepository {
    async fn insert(&self, command: NewCommand) -> AppResult<PendingCommand> {
        sqlx::query_as::<_, PendingCommand>(
            "INSERT INTO pending_commands (command, status, target_user_id, initiated_by, reason)
             VALUES ($1, 'pending', $2, $3, $4)
             RETURNING *",
        )
        .bind(command.command)
        .bind(command.target_user_id)
        .bind(command.initiated_by)
        .bind(command.reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert command", e))
    }

    async fn mark_published(&self, id: Uuid, published_at: DateTime<Utc>) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE pending_commands
             SET status = 'published', published_at = $2
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(published_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark command published", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "No pending command with id {id}"
            )));
        }
        Ok(())
    }

    async fn mark_published_many(
        &self,
        ids: &[Uuid],
        published_at: DateTime<Utc>,
    ) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "UPDATE pending_commands
             SET status = 'published', published_at = $2
             WHERE id = ANY($1) AND status = 'pending'",
        )
        .bind(ids)
        .bind(published_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark commands published", e)
        })?;
        Ok(())
    }

    async fn acknowledge(
        &self,
        id: Uuid,
        target_user_id: Uuid,
        acknowledged_at: DateTime<Utc>,
    ) -> AppResult<Option<PendingCommand>> {
        sqlx::query_as::<_, PendingCommand>(
            "UPDATE pending_commands
             SET status = 'acknowledged',
                 acknowledged_at = COALESCE(acknowledged_at, $3)
             WHERE id = $1 AND target_user_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(target_user_id)
        .bind(acknowledged_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to acknowledge command", e)
        })
    }

    async fn list_outstanding_for(&self, user_id: Uuid) -> AppResult<Vec<PendingCommand>> {
        sqlx::query_as::<_, PendingCommand>(
            "SELECT * FROM pending_commands
             WHERE target_user_id = $1 AND status <> 'acknowledged'
             ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list outstanding commands", e)
        })
    }

    async fn list_recent_for(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<PendingCommand>> {
        sqlx::query_as::<_, PendingCommand>(
            "SELECT * FROM pending_commands
             WHERE target_user_id = $1
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list recent commands", e)
        })
    }
}
