//! Cron scheduler for periodic tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use argus_core::error::AppError;

use crate::executor::JobExecutor;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Executor the scheduled tasks dispatch through
    executor: Arc<JobExecutor>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(executor: Arc<JobExecutor>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            executor,
        })
    }

    /// Presence reconciliation on the configured cron schedule
    pub async fn register_presence_reconciliation(&self, schedule: &str) -> Result<(), AppError> {
        let executor = Arc::clone(&self.executor);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let executor = Arc::clone(&executor);
            Box::pin(async move {
                let payload = serde_json::json!({"task": "presence_reconciliation"});
                if let Err(e) = executor.execute_type("presence_reconciliation", &payload).await {
                    tracing::error!("Scheduled presence_reconciliation failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!(
                "Failed to create presence_reconciliation schedule: {}",
                e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!(
                "Failed to add presence_reconciliation schedule: {}",
                e
            ))
        })?;

        tracing::info!("Registered: presence_reconciliation ({})", schedule);
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
