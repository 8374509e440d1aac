//! Store traits the service layer is written against.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`]
//! and an in-memory implementation in [`crate::memory`].

pub mod command;
pub mod presence;
pub mod session;
pub mod user;

pub use command::CommandStore;
pub use presence::PresenceStore;
pub use session::SessionStore;
pub use user::UserDirectory;
