//! # argus-database
//!
//! PostgreSQL connection management, the store traits every service is
//! written against, and their concrete implementations: one backed by
//! Postgres, one fully in memory for tests and standalone runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
