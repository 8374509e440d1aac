use argus_entity::user::UserRole;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity of the caller for the duration of one request.
///
/// Built by the API layer after the calling user has been resolved, and
/// passed into every service operation that needs authorization or an
/// audit trail.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(user_id: Uuid, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id,
            email: email.into(),
            role,
            request_time: Utc::now(),
        }
    }

    /// Whether the caller may issue commands and inspect other users.
    pub fn is_operator(&self) -> bool {
        self.role.is_operator()
    }

    /// Whether the caller sees every user rather than a supervised subset.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
