//! PostgreSQL repository implementations of the store traits.

pub mod command;
pub mod presence;
pub mod session;
pub mod user;

pub use command::CommandRepository;
pub use presence::PresenceRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
