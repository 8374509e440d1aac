use std::sync::Arc;

use argus_core::{AppError, AppResult};
use argus_database::stores::CommandStore;
use argus_entity::command::{CommandKind, CommandStatus, NewCommand, PendingCommand};
use argus_entity::session::stop_reason;
use argus_entity::user::{User, UserRole};
use argus_transport::{OutboundMessage, PublishTarget, StreamActivity, TransportGateway};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::identity::IdentityResolver;
use crate::presence::PresenceCoordinator;
use crate::streaming::StreamingSessionManager;

/// An operator's request to control a device agent.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub command: CommandKind,
    /// Target user key: id, external id, or email.
    pub target: String,
    pub reason: Option<String>,
}

/// What happened to a dispatched command.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub command: PendingCommand,
    /// Whether the command was pushed to a live connection. When false
    /// it waits in the store for the device to poll.
    pub delivered: bool,
}

/// Persists and delivers operator commands.
///
/// A command is durable before any delivery attempt: it is inserted as
/// pending, session side effects run, and only a successful publish
/// moves it to published. An offline target or a transport failure
/// leaves it pending; nothing is lost.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    commands: Arc<dyn CommandStore>,
    resolver: IdentityResolver,
    coordinator: PresenceCoordinator,
    streaming: StreamingSessionManager,
    transport: Arc<dyn TransportGateway>,
}

impl CommandDispatcher {
    pub fn new(
        commands: Arc<dyn CommandStore>,
        resolver: IdentityResolver,
        coordinator: PresenceCoordinator,
        streaming: StreamingSessionManager,
        transport: Arc<dyn TransportGateway>,
    ) -> Self {
        Self {
            commands,
            resolver,
            coordinator,
            streaming,
            transport,
        }
    }

    /// Dispatch a command on behalf of an operator.
    pub async fn dispatch(
        &self,
        ctx: &RequestContext,
        request: DispatchRequest,
    ) -> AppResult<DispatchOutcome> {
        if !ctx.is_operator() {
            return Err(AppError::authorization(
                "Only supervisors and admins may dispatch commands",
            ));
        }

        let target = self.resolver.resolve(&request.target).await?;
        ensure_operator_scope(ctx, &target)?;

        let mut command = self
            .commands
            .insert(NewCommand {
                command: request.command,
                target_user_id: target.id,
                initiated_by: Some(ctx.user_id),
                reason: request.reason,
            })
            .await?;
        info!(
            command_id = %command.id,
            kind = %command.command,
            target = %target.email,
            initiated_by = %ctx.email,
            "Command persisted"
        );

        match command.command {
            CommandKind::Start => {
                self.streaming.start(&target).await?;
            }
            CommandKind::Stop => {
                let reason = command.reason.as_deref().unwrap_or(stop_reason::COMMAND);
                self.streaming.stop(&target, reason).await?;
            }
            CommandKind::Refresh => {}
        }

        let delivery = if self.coordinator.get_status(target.id).await?.is_online() {
            self.push_to_device(&command, &target, ctx).await
        } else {
            info!(
                command_id = %command.id,
                target = %target.email,
                "Target offline, command stays pending"
            );
            Ok(false)
        };

        // Supervisors watching the target's channel get feedback no
        // matter how delivery went.
        self.stream_hint(&target, &command).await;

        if !delivery? {
            return Ok(DispatchOutcome {
                command,
                delivered: false,
            });
        }

        let published_at = Utc::now();
        self.commands.mark_published(command.id, published_at).await?;
        command.status = CommandStatus::Published;
        command.published_at = Some(published_at);

        Ok(DispatchOutcome {
            command,
            delivered: true,
        })
    }

    /// Push the command to the target's identity channel.
    ///
    /// A publish failure surfaces to the operator; the pending row is
    /// the retry anchor, so nothing is rolled back.
    async fn push_to_device(
        &self,
        command: &PendingCommand,
        target: &User,
        ctx: &RequestContext,
    ) -> AppResult<bool> {
        let message = OutboundMessage::Command {
            id: command.id,
            command: command.command,
            reason: command.reason.clone(),
            initiated_by: Some(ctx.email.clone()),
            issued_at: command.created_at,
        };
        let payload = serde_json::to_value(&message)?;
        let identity = PublishTarget::identity(target.email.as_str());
        if let Err(e) = self.transport.publish(&identity, &payload).await {
            warn!(
                error = %e,
                command_id = %command.id,
                "Publish failed, command stays pending"
            );
            return Err(e);
        }
        Ok(true)
    }

    /// Best-effort stream-status hint to the target's own channel:
    /// `pending` for START, `stopped` for STOP, nothing for REFRESH.
    async fn stream_hint(&self, target: &User, command: &PendingCommand) {
        let status = match command.command {
            CommandKind::Start => StreamActivity::Pending,
            CommandKind::Stop => StreamActivity::Stopped,
            CommandKind::Refresh => return,
        };
        self.streaming
            .announce(target, status, command.reason.clone())
            .await;
    }

    /// Commands awaiting the calling device, oldest first.
    ///
    /// Polling is the fallback delivery path for commands that missed a
    /// live connection, so anything still pending is marked published
    /// once it has been handed out. Everything unacknowledged keeps
    /// appearing until the device acknowledges it.
    pub async fn poll(&self, ctx: &RequestContext) -> AppResult<Vec<PendingCommand>> {
        let mut outstanding = self.commands.list_outstanding_for(ctx.user_id).await?;

        let pending_ids: Vec<Uuid> = outstanding
            .iter()
            .filter(|command| command.status == CommandStatus::Pending)
            .map(|command| command.id)
            .collect();
        if !pending_ids.is_empty() {
            let now = Utc::now();
            self.commands.mark_published_many(&pending_ids, now).await?;
            for command in outstanding
                .iter_mut()
                .filter(|command| command.status == CommandStatus::Pending)
            {
                command.status = CommandStatus::Published;
                command.published_at = Some(now);
            }
            info!(
                user_id = %ctx.user_id,
                count = pending_ids.len(),
                "Handed out pending commands on poll"
            );
        }

        Ok(outstanding)
    }

    /// Record that the target's device executed a command.
    pub async fn acknowledge(
        &self,
        ctx: &RequestContext,
        command_id: Uuid,
    ) -> AppResult<PendingCommand> {
        let acknowledged = self
            .commands
            .acknowledge(command_id, ctx.user_id, Utc::now())
            .await?;
        acknowledged.ok_or_else(|| {
            AppError::not_found(format!(
                "No command {command_id} addressed to {}",
                ctx.email
            ))
        })
    }

    /// Recent commands for a target, newest first. Users always see
    /// their own history; operators see targets within their scope.
    pub async fn recent_for(
        &self,
        ctx: &RequestContext,
        target_key: &str,
        limit: i64,
    ) -> AppResult<Vec<PendingCommand>> {
        let target = self.resolver.resolve(target_key).await?;
        if target.id != ctx.user_id {
            ensure_operator_scope(ctx, &target)?;
        }
        self.commands.list_recent_for(target.id, limit).await
    }
}

fn ensure_operator_scope(ctx: &RequestContext, target: &User) -> AppResult<()> {
    if !ctx.is_operator() {
        return Err(AppError::authorization(
            "Only supervisors and admins may inspect other users",
        ));
    }
    if ctx.role == UserRole::Supervisor && target.supervisor_id != Some(ctx.user_id) {
        return Err(AppError::authorization(format!(
            "{} does not supervise {}",
            ctx.email, target.email
        )));
    }
    Ok(())
}
