//! Repository ports - Interfaces for entity persistence
//!
//! Application services depend on these traits, not on the SQLite adapters.
//! Store failures are returned as opaque `anyhow` errors and passed through
//! unchanged.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{Character, Player};
use crate::domain::value_objects::{CharacterAttribute, Identifier};

// =============================================================================
// Character Repository Port
// =============================================================================

/// Repository port for Character operations
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Insert a new character; fails on identifier collision
    async fn create(&self, character: &Character) -> Result<()>;

    /// Overwrite a stored character
    async fn update(&self, character: &Character) -> Result<()>;

    /// Hard-delete a character
    async fn remove(&self, character: &Character) -> Result<()>;

    /// All characters in storage order
    async fn find_all(&self) -> Result<Vec<Character>>;

    async fn find_by_identifier(&self, identifier: &Identifier) -> Result<Option<Character>>;

    /// Characters whose attribute equals the given value
    async fn find_by_attribute(&self, attribute: &CharacterAttribute) -> Result<Vec<Character>>;
}

// =============================================================================
// Player Repository Port
// =============================================================================

/// Repository port for Player operations
#[async_trait]
pub trait PlayerRepositoryPort: Send + Sync {
    async fn create(&self, player: &Player) -> Result<()>;

    async fn update(&self, player: &Player) -> Result<()>;

    async fn remove(&self, player: &Player) -> Result<()>;

    async fn find_all(&self) -> Result<Vec<Player>>;

    async fn find_by_identifier(&self, identifier: &Identifier) -> Result<Option<Player>>;
}
