//! # argus-video
//!
//! Client for the video backend that owns recording sessions. Argus
//! only ever asks it to stop the recordings of a user whose device
//! dropped off the transport. Callers treat the call as best-effort;
//! this crate just reports what the backend said.

pub mod http;
pub mod noop;
pub mod provider;

pub use http::HttpVideoSessions;
pub use noop::NoopVideoSessions;
pub use provider::{RecordingStopSummary, VideoSessionProvider, create_video_provider};
