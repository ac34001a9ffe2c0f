//! Domain layer - Records and value objects with no I/O
//!
//! This layer contains:
//! - Entities: Character, Player
//! - Value Objects: identifiers and attribute filters

pub mod entities;
pub mod value_objects;
