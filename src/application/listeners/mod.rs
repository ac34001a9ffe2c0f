//! Lifecycle listeners - synchronous hooks fired by the services
//!
//! Listeners run inside the operation that fires them: a character listener
//! sees the record after validation and before it is stored, so whatever it
//! writes is persisted and returned to the caller.

mod character_listener;
mod player_listener;

pub use character_listener::CreationBonusListener;
pub use player_listener::AuditPlayerListener;

use crate::domain::entities::{Character, Player};

/// Hooks on the character lifecycle
pub trait CharacterListener: Send + Sync {
    /// Fired once per creation, after validation and before persistence
    fn character_created(&self, character: &mut Character);
}

/// Hooks on the player lifecycle
pub trait PlayerListener: Send + Sync {
    /// Fired after a modification has been stored
    fn player_modified(&self, player: &Player);
}
