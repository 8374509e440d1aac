//! Route definitions for the Argus HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use argus_core::config::app::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(event_routes())
        .merge(command_routes())
        .merge(presence_routes())
        .merge(session_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Inbound transport webhook
fn event_routes() -> Router<AppState> {
    Router::new().route("/events", post(handlers::events::receive_event))
}

/// Command dispatch, device polling, acknowledgment, and listing
fn command_routes() -> Router<AppState> {
    Router::new()
        .route("/commands", post(handlers::command::dispatch_command))
        .route("/commands/pending", get(handlers::command::poll_commands))
        .route("/commands/recent", get(handlers::command::recent_commands))
        .route(
            "/commands/{id}/ack",
            post(handlers::command::acknowledge_command),
        )
}

/// Presence listing, lookup, history, and manual reconciliation
fn presence_routes() -> Router<AppState> {
    Router::new()
        .route("/presence", get(handlers::presence::list_presence))
        .route("/presence/{key}", get(handlers::presence::get_presence))
        .route(
            "/presence/{key}/history",
            get(handlers::presence::presence_history),
        )
        .route("/reconcile", post(handlers::presence::trigger_reconcile))
}

/// Streaming session visibility
fn session_routes() -> Router<AppState> {
    Router::new().route("/sessions/active", get(handlers::session::active_sessions))
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    use axum::http::{HeaderName, HeaderValue, Method};
    use tower_http::cors::Any;

    let mut cors = CorsLayer::new();

    if config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|header| header.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}
