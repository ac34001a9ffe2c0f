//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite adapters for the entity store
//! - HTTP: REST API and form routes
//! - Authorization: the configured access gate
//! - Clock: system time source
//! - Images: character image directory
//! - Config and State: application configuration and shared state

pub mod authorization;
pub mod clock;
pub mod config;
pub mod http;
pub mod images;
pub mod persistence;
pub mod state;
