//! Route handlers organized by domain.

pub mod command;
pub mod events;
pub mod health;
pub mod presence;
pub mod session;
