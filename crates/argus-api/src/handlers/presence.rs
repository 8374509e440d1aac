//! Presence handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use argus_core::AppError;
use argus_entity::presence::PresenceStatus;
use argus_service::SweepReport;

use crate::dto::request::HistoryParams;
use crate::dto::response::{
    ApiResponse, HistoryEntryResponse, PresenceResponse, UserPresenceResponse,
};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/presence
pub async fn list_presence(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<UserPresenceResponse>>>> {
    let rows = state.users.list_active_with_presence().await?;
    let items = rows.into_iter().map(UserPresenceResponse::from).collect();
    Ok(Json(ApiResponse::ok(items)))
}

/// GET /api/presence/{key}
pub async fn get_presence(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(key): Path<String>,
) -> ApiResult<Json<ApiResponse<PresenceResponse>>> {
    let user = state.resolver.resolve(&key).await?;
    let record = state.coordinator.find(user.id).await?;

    let (status, last_seen_at) = match record {
        Some(record) => (record.status, Some(record.last_seen_at)),
        None => (PresenceStatus::Offline, None),
    };
    Ok(Json(ApiResponse::ok(PresenceResponse {
        user_id: user.id,
        email: user.email,
        status,
        last_seen_at,
    })))
}

/// GET /api/presence/{key}/history?limit=
pub async fn presence_history(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(key): Path<String>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<ApiResponse<Vec<HistoryEntryResponse>>>> {
    let user = state.resolver.resolve(&key).await?;
    let limit = params
        .limit
        .map(|limit| limit.clamp(1, 100))
        .unwrap_or(state.config.presence.history_limit);
    let entries = state.coordinator.history(user.id, limit).await?;
    let items = entries.into_iter().map(HistoryEntryResponse::from).collect();
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/reconcile
///
/// Manual sweep trigger for admins, bypassing the cron cadence.
pub async fn trigger_reconcile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<SweepReport>>> {
    if !auth.is_admin() {
        return Err(AppError::authorization("Only admins may trigger reconciliation").into());
    }
    let report = state.reconciler.run().await?;
    Ok(Json(ApiResponse::ok(report)))
}
