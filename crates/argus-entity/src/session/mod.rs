//! Streaming session domain entities.

pub mod model;

pub use model::{StreamingSession, stop_reason};
