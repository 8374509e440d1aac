//! # argus-transport
//!
//! Everything Argus knows about the realtime transport: the gateway
//! trait for its management API, normalization of the connection
//! lifecycle events it posts back to us, and the outbound message
//! types pushed to devices and dashboards.

pub mod event;
pub mod gateway;
pub mod memory;
pub mod message;
pub mod provider;
pub mod rest;

pub use event::{ConnectionEvent, EventPhase, NormalizedEvent};
pub use gateway::{PublishTarget, TransportGateway};
pub use memory::MemoryTransportGateway;
pub use message::{OutboundMessage, StreamActivity};
pub use provider::create_gateway;
pub use rest::RestTransportGateway;
