//! Operator command domain entities.

pub mod kind;
pub mod model;
pub mod status;

pub use kind::CommandKind;
pub use model::{NewCommand, PendingCommand};
pub use status::CommandStatus;
