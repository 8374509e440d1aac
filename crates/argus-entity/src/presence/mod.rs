//! Presence domain entities.

pub mod model;
pub mod status;

pub use model::{PresenceHistoryEntry, PresenceRecord, UserPresence};
pub use status::PresenceStatus;
