//! Transport gateway construction from configuration.

use std::sync::Arc;

use tracing::info;

use argus_core::config::transport::TransportConfig;
use argus_core::error::AppError;
use argus_core::result::AppResult;

use crate::gateway::TransportGateway;
use crate::memory::MemoryTransportGateway;
use crate::rest::RestTransportGateway;

/// Create the transport gateway selected by configuration.
pub fn create_gateway(config: &TransportConfig) -> AppResult<Arc<dyn TransportGateway>> {
    match config.provider.as_str() {
        "rest" => {
            info!(endpoint = %config.endpoint, "Initializing REST transport gateway");
            Ok(Arc::new(RestTransportGateway::new(config)?))
        }
        "memory" => {
            info!("Initializing in-memory transport gateway");
            Ok(Arc::new(MemoryTransportGateway::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown transport provider: '{other}'. Supported: rest, memory"
        ))),
    }
}
