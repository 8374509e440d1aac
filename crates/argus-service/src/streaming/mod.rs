//! Live-view streaming session control.

pub mod service;

pub use service::StreamingSessionManager;
