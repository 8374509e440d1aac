//! Presence coordination.
//!
//! Everything that moves a user between online and offline lives here:
//! the coordinator that applies transitions, the handler that feeds it
//! transport lifecycle events, and the sweep that converges the store
//! on the transport's connection registry.

pub mod coordinator;
pub mod events;
pub mod reconcile;

pub use coordinator::PresenceCoordinator;
pub use events::ConnectionEventHandler;
pub use reconcile::{ReconciliationSweep, SweepReport};
