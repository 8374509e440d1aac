//! # argus-service
//!
//! Business logic for Argus. The services here sit between the HTTP layer
//! and the storage/transport layers:
//!
//! - [`identity::IdentityResolver`] turns opaque connection identities into users
//! - [`presence::PresenceCoordinator`] owns online/offline transitions
//! - [`presence::ConnectionEventHandler`] reacts to transport lifecycle events
//! - [`presence::ReconciliationSweep`] converges the presence store on the live registry
//! - [`streaming::StreamingSessionManager`] enforces the single-active-session rule
//! - [`command::CommandDispatcher`] persists and delivers operator commands

pub mod command;
pub mod context;
pub mod identity;
pub mod presence;
pub mod streaming;

#[cfg(test)]
pub(crate) mod testsupport;

pub use command::{CommandDispatcher, DispatchOutcome, DispatchRequest};
pub use context::RequestContext;
pub use identity::IdentityResolver;
pub use presence::{ConnectionEventHandler, PresenceCoordinator, ReconciliationSweep, SweepReport};
pub use streaming::StreamingSessionManager;
