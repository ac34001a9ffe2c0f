//! Authorization gate port
//!
//! Every route asks the gate before running a core operation. The subject
//! is the identifier of the record being acted on, or `None` for listing and
//! creation.

use std::str::FromStr;

use crate::domain::value_objects::Identifier;

/// Operations guarded by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CharacterDisplay,
    CharacterCreate,
    CharacterIndex,
    CharacterIntelligence,
    CharacterLife,
    CharacterCaste,
    CharacterKnowledge,
    CharacterModify,
    CharacterDelete,
    PlayerDisplay,
    PlayerCreate,
    PlayerIndex,
    PlayerModify,
    PlayerDelete,
}

impl Action {
    pub const ALL: [Action; 14] = [
        Action::CharacterDisplay,
        Action::CharacterCreate,
        Action::CharacterIndex,
        Action::CharacterIntelligence,
        Action::CharacterLife,
        Action::CharacterCaste,
        Action::CharacterKnowledge,
        Action::CharacterModify,
        Action::CharacterDelete,
        Action::PlayerDisplay,
        Action::PlayerCreate,
        Action::PlayerIndex,
        Action::PlayerModify,
        Action::PlayerDelete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CharacterDisplay => "characterDisplay",
            Action::CharacterCreate => "characterCreate",
            Action::CharacterIndex => "characterIndex",
            Action::CharacterIntelligence => "characterIntelligence",
            Action::CharacterLife => "characterLife",
            Action::CharacterCaste => "characterCaste",
            Action::CharacterKnowledge => "characterKnowledge",
            Action::CharacterModify => "characterModify",
            Action::CharacterDelete => "characterDelete",
            Action::PlayerDisplay => "playerDisplay",
            Action::PlayerCreate => "playerCreate",
            Action::PlayerIndex => "playerIndex",
            Action::PlayerModify => "playerModify",
            Action::PlayerDelete => "playerDelete",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown gate action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Access denied for {action}")]
pub struct AccessDenied {
    pub action: Action,
}

pub trait AuthorizationPort: Send + Sync {
    fn check(&self, action: Action, subject: Option<&Identifier>) -> Result<(), AccessDenied>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
        assert!("characterTeleport".parse::<Action>().is_err());
    }
}
