//! Domain entities - Core business objects with identity

mod character;
mod player;

pub use character::{Character, MAX_STAT};
pub use player::Player;
