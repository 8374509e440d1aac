//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background job worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron schedule for the periodic presence reconciliation sweep.
    #[serde(default = "default_reconcile_schedule")]
    pub reconcile_schedule: String,
}

fn default_true() -> bool {
    true
}

fn default_reconcile_schedule() -> String {
    // sec min hour day month weekday
    "0 * * * * *".to_string()
}
