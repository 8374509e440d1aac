//! Application builder — wires stores, services, and worker into a running server.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::watch;

use argus_core::config::AppConfig;
use argus_core::error::AppError;
use argus_database::repositories::{
    CommandRepository, PresenceRepository, SessionRepository, UserRepository,
};
use argus_service::{
    CommandDispatcher, ConnectionEventHandler, IdentityResolver, PresenceCoordinator,
    ReconciliationSweep, StreamingSessionManager,
};
use argus_worker::jobs::ReconcileJobHandler;
use argus_worker::{CronScheduler, JobExecutor};

use crate::router::build_router;
use crate::state::AppState;

/// Runs the Argus server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting Argus server...");

    // ── Step 1: Initialize repositories ──────────────────────────
    let users = Arc::new(UserRepository::new(db_pool.clone()));
    let presence = Arc::new(PresenceRepository::new(db_pool.clone()));
    let sessions = Arc::new(SessionRepository::new(db_pool.clone()));
    let commands = Arc::new(CommandRepository::new(db_pool.clone()));

    // ── Step 2: Initialize transport gateway ─────────────────────
    let transport = argus_transport::create_gateway(&config.transport)?;

    // ── Step 3: Initialize video provider ────────────────────────
    let video = argus_video::create_video_provider(&config.video)?;

    // ── Step 4: Initialize services ───────────────────────────────
    let resolver = IdentityResolver::new(users.clone());
    let streaming = StreamingSessionManager::new(sessions.clone(), transport.clone());
    let coordinator = PresenceCoordinator::new(
        presence.clone(),
        streaming.clone(),
        video.clone(),
        transport.clone(),
        config.presence.group.clone(),
        config.video.sas_minutes,
    );
    let reconciler = ReconciliationSweep::new(
        users.clone(),
        coordinator.clone(),
        transport.clone(),
        config.presence.group.clone(),
    );
    let events =
        ConnectionEventHandler::new(resolver.clone(), coordinator.clone(), reconciler.clone());
    let dispatcher = CommandDispatcher::new(
        commands.clone(),
        resolver.clone(),
        coordinator.clone(),
        streaming.clone(),
        transport.clone(),
    );
    tracing::info!("Services initialized");

    // ── Step 5: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 6: Start background worker ──────────────────────────
    let worker_handle = if config.worker.enabled {
        let mut executor = JobExecutor::new();
        executor.register(Arc::new(ReconcileJobHandler::new(reconciler.clone())));

        let mut scheduler = CronScheduler::new(Arc::new(executor)).await?;
        scheduler
            .register_presence_reconciliation(&config.worker.reconcile_schedule)
            .await?;
        scheduler.start().await?;
        tracing::info!("Background worker started");

        let mut cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            let _ = cancel.changed().await;
            if let Err(e) = scheduler.shutdown().await {
                tracing::error!("Scheduler shutdown failed: {}", e);
            }
        }))
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 7: Build application state ──────────────────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        users,
        resolver,
        events,
        coordinator,
        reconciler,
        streaming,
        dispatcher,
    };

    let app = build_router(state);

    // ── Step 8: Start HTTP server ────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Argus server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 9: Wait for background tasks ────────────────────────
    if let Some(handle) = worker_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(10), handle).await;
    }

    tracing::info!("Argus server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
