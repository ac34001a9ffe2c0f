//! Character attribute filters

/// An attribute/value pair used to select characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterAttribute {
    Intelligence(i32),
    Life(i32),
    Caste(String),
    Knowledge(String),
}

impl CharacterAttribute {
    /// Name of the attribute as exposed to API callers
    pub fn name(&self) -> &'static str {
        match self {
            Self::Intelligence(_) => "intelligence",
            Self::Life(_) => "life",
            Self::Caste(_) => "caste",
            Self::Knowledge(_) => "knowledge",
        }
    }
}

impl std::fmt::Display for CharacterAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Intelligence(value) | Self::Life(value) => write!(f, "{}={}", self.name(), value),
            Self::Caste(value) | Self::Knowledge(value) => write!(f, "{}={}", self.name(), value),
        }
    }
}
