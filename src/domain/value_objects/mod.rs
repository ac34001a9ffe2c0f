//! Value objects - Immutable objects defined by their attributes

mod attribute;
mod identifier;

pub use attribute::CharacterAttribute;
pub use identifier::Identifier;
