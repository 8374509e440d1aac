//! Task executor — dispatches scheduled tasks to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use argus_core::error::AppError;

/// Trait for scheduled task handler implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Get the task type this handler processes
    fn job_type(&self) -> &str;

    /// Execute the task with the given payload
    async fn execute(&self, payload: &Value) -> Result<Option<Value>, JobExecutionError>;
}

/// Error from task execution
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// Permanent failure — do not retry
    #[error("Permanent task failure: {0}")]
    Permanent(String),

    /// Transient failure — the next scheduled run retries
    #[error("Transient task failure: {0}")]
    Transient(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

/// Dispatches tasks to the appropriate handler based on job_type
#[derive(Debug)]
pub struct JobExecutor {
    /// Registered task handlers by type
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl JobExecutor {
    /// Create a new task executor
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a task handler
    pub fn register(&mut self, handler: Arc<dyn JobHandler>) {
        let job_type = handler.job_type().to_string();
        tracing::info!("Registered task handler for type '{}'", job_type);
        self.handlers.insert(job_type, handler);
    }

    /// Execute a task by dispatching to the correct handler
    pub async fn execute_type(
        &self,
        job_type: &str,
        payload: &Value,
    ) -> Result<Option<Value>, JobExecutionError> {
        let handler = self.handlers.get(job_type).ok_or_else(|| {
            JobExecutionError::Permanent(format!(
                "No handler registered for task type '{}'",
                job_type
            ))
        })?;

        tracing::debug!("Executing scheduled task: type='{}'", job_type);
        handler.execute(payload).await
    }

    /// Check if a handler is registered for a task type
    pub fn has_handler(&self, job_type: &str) -> bool {
        self.handlers.contains_key(job_type)
    }

    /// Get the list of registered task types
    pub fn registered_types(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}

impl Default for JobExecutor {
    fn default() -> Self {
        Self::new()
    }
}
