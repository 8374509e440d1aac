//! # argus-entity
//!
//! Domain entity models for Argus. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod command;
pub mod presence;
pub mod session;
pub mod user;
