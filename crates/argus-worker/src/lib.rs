//! Scheduled background tasks for Argus.
//!
//! This crate provides:
//! - A cron scheduler for periodic tasks
//! - A task executor that dispatches to the correct handler
//! - The built-in presence reconciliation task

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use scheduler::CronScheduler;
