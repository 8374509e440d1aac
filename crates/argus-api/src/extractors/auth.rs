//! `AuthUser` extractor — resolves the verified caller identity header into a request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use argus_core::AppError;
use argus_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the caller's user key. The fronting identity layer
/// verifies the token and forwards only the key, so its value is any of
/// the identities [`argus_service::IdentityResolver`] accepts.
pub const USER_HEADER: &str = "x-argus-user";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::from(AppError::authentication(format!(
                    "Missing {USER_HEADER} header"
                )))
            })?;

        // Any resolution failure reads as an unauthenticated caller,
        // never as a hint about which users exist.
        let user = state.resolver.resolve(key).await.map_err(|e| {
            ApiError::from(AppError::authentication(format!(
                "Caller identity did not resolve: {}",
                e.message
            )))
        })?;

        Ok(AuthUser(RequestContext::new(user.id, user.email, user.role)))
    }
}
