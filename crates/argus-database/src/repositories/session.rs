//! Streaming session repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use argus_core::error::{AppError, ErrorKind};
use argus_core::result::AppResult;
use argus_entity::session::StreamingSession;

use crate::stores::SessionStore;

/// PostgreSQL-backed streaming session store.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn insert(
        &self,
        user_id: Uuid,
        started_at: DateTime<Utc>,
    ) -> AppResult<StreamingSession> {
        sqlx::query_as::<_, StreamingSession>(
            "INSERT INTO streaming_sessions (user_id, started_at)
             VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(started_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert streaming session", e)
        })
    }

    async fn close_open(
        &self,
        user_id: Uuid,
        reason: &str,
        stopped_at: DateTime<Utc>,
    ) -> AppResult<Vec<StreamingSession>> {
        sqlx::query_as::<_, StreamingSession>(
            "UPDATE streaming_sessions
             SET stopped_at = $3, stop_reason = $2
             WHERE user_id = $1 AND stopped_at IS NULL
             RETURNING *",
        )
        .bind(user_id)
        .bind(reason)
        .bind(stopped_at)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to close streaming sessions", e)
        })
    }

    async fn find_open(&self, user_id: Uuid) -> AppResult<Option<StreamingSession>> {
        sqlx::query_as::<_, StreamingSession>(
            "SELECT * FROM streaming_sessions
             WHERE user_id = $1 AND stopped_at IS NULL
             ORDER BY started_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find open session", e)
        })
    }

    async fn find_latest(&self, user_id: Uuid) -> AppResult<Option<StreamingSession>> {
        sqlx::query_as::<_, StreamingSession>(
            "SELECT * FROM streaming_sessions
             WHERE user_id = $1
             ORDER BY started_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find latest session", e)
        })
    }

    async fn list_open(&self) -> AppResult<Vec<StreamingSession>> {
        sqlx::query_as::<_, StreamingSession>(
            "SELECT * FROM streaming_sessions
             WHERE stopped_at IS NULL
             ORDER BY started_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list open sessions", e)
        })
    }

    async fn list_open_supervised_by(
        &self,
        supervisor_id: Uuid,
    ) -> AppResult<Vec<StreamingSession>> {
        sqlx::query_as::<_, StreamingSession>(
            "SELECT s.* FROM streaming_sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.stopped_at IS NULL
               AND u.supervisor_id = $1
               AND u.deleted_at IS NULL
             ORDER BY s.started_at DESC",
        )
        .bind(supervisor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to list supervised open sessions",
                e,
            )
        })
    }
}
