//! Presence reconciliation task — converges the presence store on the
//! transport's connection registry.

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use argus_service::ReconciliationSweep;

use crate::executor::{JobExecutionError, JobHandler};

/// Handles the periodic presence reconciliation pass
#[derive(Debug)]
pub struct ReconcileJobHandler {
    /// The sweep shared with the event-driven path
    sweep: ReconciliationSweep,
}

impl ReconcileJobHandler {
    /// Create a new reconciliation task handler
    pub fn new(sweep: ReconciliationSweep) -> Self {
        Self { sweep }
    }
}

#[async_trait]
impl JobHandler for ReconcileJobHandler {
    fn job_type(&self) -> &str {
        "presence_reconciliation"
    }

    async fn execute(&self, _payload: &Value) -> Result<Option<Value>, JobExecutionError> {
        tracing::debug!("Running scheduled presence reconciliation");

        // Registry and store outages heal themselves; retry next tick.
        let report = self
            .sweep
            .run()
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Reconciliation failed: {}", e)))?;

        if report.has_changes() {
            tracing::info!(
                "Scheduled reconciliation: {} online, {} offline, {} failed (checked {})",
                report.marked_online,
                report.marked_offline,
                report.failed,
                report.checked
            );
        }

        let result = serde_json::to_value(&report)
            .map_err(|e| JobExecutionError::Permanent(format!("Failed to encode report: {}", e)))?;
        Ok(Some(result))
    }
}
