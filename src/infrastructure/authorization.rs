//! Configured access gate
//!
//! Grants every action except the ones listed in `DENIED_ACTIONS`.

use std::collections::HashSet;

use crate::application::ports::outbound::{AccessDenied, Action, AuthorizationPort};
use crate::domain::value_objects::Identifier;

pub struct ConfiguredGate {
    denied: HashSet<Action>,
}

impl ConfiguredGate {
    pub fn new(denied: impl IntoIterator<Item = Action>) -> Self {
        Self {
            denied: denied.into_iter().collect(),
        }
    }
}

impl AuthorizationPort for ConfiguredGate {
    fn check(&self, action: Action, subject: Option<&Identifier>) -> Result<(), AccessDenied> {
        if self.denied.contains(&action) {
            tracing::warn!(
                %action,
                subject = subject.map(Identifier::as_str).unwrap_or("-"),
                "Access denied"
            );
            return Err(AccessDenied { action });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denies_only_configured_actions() {
        let gate = ConfiguredGate::new([Action::PlayerDelete]);

        assert_eq!(
            gate.check(Action::PlayerDelete, None),
            Err(AccessDenied {
                action: Action::PlayerDelete
            })
        );
        assert!(gate.check(Action::PlayerDisplay, None).is_ok());
        assert!(ConfiguredGate::new([])
            .check(Action::PlayerDelete, None)
            .is_ok());
    }
}
