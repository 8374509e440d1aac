//! Streaming session handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, SessionResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/sessions/active
///
/// Role-scoped: admins see every open session, supervisors their own
/// supervisees, everyone else an empty list.
pub async fn active_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<SessionResponse>>>> {
    let sessions = state.streaming.list_active(auth.context()).await?;
    let items = sessions.into_iter().map(SessionResponse::from).collect();
    Ok(Json(ApiResponse::ok(items)))
}
