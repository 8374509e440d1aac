//! # argus-api
//!
//! HTTP API layer for Argus built on Axum.
//!
//! Provides the inbound transport webhook, command dispatch and polling,
//! presence and session endpoints, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::run_server;
pub use router::build_router;
pub use state::AppState;
