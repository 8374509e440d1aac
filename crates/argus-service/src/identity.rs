use std::sync::Arc;

use argus_core::{AppError, AppResult};
use argus_database::stores::UserDirectory;
use argus_entity::user::User;
use uuid::Uuid;

/// Resolves opaque connection identities to users.
///
/// Transports attach whatever identity the device agent authenticated
/// with, so a single key may be a user id, an external directory id, or
/// an email address. Resolution tries, in order:
///
/// 1. the user id, when the key parses as a UUID
/// 2. the external directory id
/// 3. the email address (case-insensitive)
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    users: Arc<dyn UserDirectory>,
}

impl IdentityResolver {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn resolve(&self, key: &str) -> AppResult<User> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::validation("Identity key cannot be empty"));
        }

        if let Ok(id) = Uuid::parse_str(key) {
            if let Some(user) = self.users.find_by_id(id).await? {
                return Ok(user);
            }
        }

        if let Some(user) = self.users.find_by_external_id(key).await? {
            return Ok(user);
        }

        if let Some(user) = self.users.find_by_email(key).await? {
            return Ok(user);
        }

        Err(AppError::user_not_found(format!(
            "No user matches identity '{key}'"
        )))
    }
}
