//! Operator command dispatch.

pub mod dispatch;

pub use dispatch::{CommandDispatcher, DispatchOutcome, DispatchRequest};
