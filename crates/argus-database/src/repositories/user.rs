//! User directory repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use argus_core::error::{AppError, ErrorKind};
use argus_core::result::AppResult;
use argus_entity::presence::UserPresence;
use argus_entity::user::User;

use crate::stores::UserDirectory;

/// PostgreSQL-backed user directory.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by email", e))
    }

    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE external_id = $1 AND deleted_at IS NULL",
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by external id", e)
        })
    }

    async fn list_active_with_presence(&self) -> AppResult<Vec<UserPresence>> {
        sqlx::query_as::<_, UserPresence>(
            "SELECT u.id AS user_id, u.email, u.external_id, u.display_name,
                    p.status, p.last_seen_at
             FROM users u
             LEFT JOIN presence_records p ON p.user_id = u.id
             WHERE u.deleted_at IS NULL
             ORDER BY u.email",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list users with presence", e)
        })
    }
}
