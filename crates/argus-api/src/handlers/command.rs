//! Operator command handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use argus_entity::command::CommandKind;
use argus_service::DispatchRequest;

use crate::dto::request::{DispatchCommandRequest, RecentCommandsParams};
use crate::dto::response::{ApiResponse, CommandResponse, DispatchResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/commands
pub async fn dispatch_command(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DispatchCommandRequest>,
) -> ApiResult<Json<DispatchResponse>> {
    let command: CommandKind = req.command.parse()?;
    let outcome = state
        .dispatcher
        .dispatch(
            auth.context(),
            DispatchRequest {
                command,
                target: req.target_email,
                reason: req.reason,
            },
        )
        .await?;
    Ok(Json(DispatchResponse::from(outcome)))
}

/// GET /api/commands/pending
///
/// The calling device drains its outstanding commands; anything still
/// pending counts as delivered once it has been handed out.
pub async fn poll_commands(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<CommandResponse>>>> {
    let commands = state.dispatcher.poll(auth.context()).await?;
    let items = commands.into_iter().map(CommandResponse::from).collect();
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/commands/{id}/ack
pub async fn acknowledge_command(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<CommandResponse>>> {
    let command = state.dispatcher.acknowledge(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(CommandResponse::from(command))))
}

/// GET /api/commands/recent?target_email=&limit=
pub async fn recent_commands(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<RecentCommandsParams>,
) -> ApiResult<Json<ApiResponse<Vec<CommandResponse>>>> {
    let limit = params.limit.clamp(1, 100);
    let commands = state
        .dispatcher
        .recent_for(auth.context(), &params.target_email, limit)
        .await?;
    let items = commands.into_iter().map(CommandResponse::from).collect();
    Ok(Json(ApiResponse::ok(items)))
}
