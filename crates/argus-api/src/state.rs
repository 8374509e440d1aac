//! Application state shared across all handlers.

use std::sync::Arc;

use argus_core::config::AppConfig;
use argus_database::stores::UserDirectory;
use argus_service::{
    CommandDispatcher, ConnectionEventHandler, IdentityResolver, PresenceCoordinator,
    ReconciliationSweep, StreamingSessionManager,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Services hold
/// their stores behind `Arc`s, so cloning the state is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Stores ───────────────────────────────────────────────
    /// User directory
    pub users: Arc<dyn UserDirectory>,

    // ── Services ─────────────────────────────────────────────
    /// Connection identity resolver
    pub resolver: IdentityResolver,
    /// Transport lifecycle event handler
    pub events: ConnectionEventHandler,
    /// Presence transition coordinator
    pub coordinator: PresenceCoordinator,
    /// Registry/store reconciliation sweep
    pub reconciler: ReconciliationSweep,
    /// Streaming session manager
    pub streaming: StreamingSessionManager,
    /// Operator command dispatcher
    pub dispatcher: CommandDispatcher,
}
