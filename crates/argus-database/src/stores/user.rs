//! User directory trait.

use async_trait::async_trait;
use uuid::Uuid;

use argus_core::result::AppResult;
use argus_entity::presence::UserPresence;
use argus_entity::user::User;

/// Read access to the user directory.
///
/// Every lookup excludes soft-deleted users: a deleted user must never
/// resolve from a connection identity or a command target.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Find an active user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find an active user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find an active user by the external identifier.
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<User>>;

    /// List every active user joined with their presence record.
    ///
    /// Users who never connected appear with no status and are treated
    /// as offline by [`UserPresence::effective_status`].
    async fn list_active_with_presence(&self) -> AppResult<Vec<UserPresence>>;
}
