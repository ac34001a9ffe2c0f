//! Application layer - Use cases and orchestration
//!
//! - Pipeline: hydrate, completeness and serialization stages
//! - Listeners: lifecycle hooks fired by the services
//! - Ports: interfaces required from the infrastructure
//! - Services: character and player use cases

pub mod listeners;
pub mod pipeline;
pub mod ports;
pub mod services;
