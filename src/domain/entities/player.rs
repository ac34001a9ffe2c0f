//! Player entity - account holding a mirian balance

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::domain::value_objects::Identifier;

/// A player record
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Player {
    pub identifier: Identifier,
    #[validate(required, length(min = 1, max = 255))]
    pub firstname: Option<String>,
    #[validate(required, length(min = 1, max = 255))]
    pub lastname: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    /// In-game currency balance
    #[validate(required, range(min = 0))]
    pub mirian: Option<i64>,
    pub creation_date: DateTime<Utc>,
    pub modification: DateTime<Utc>,
}

impl Player {
    pub fn new(identifier: Identifier, now: DateTime<Utc>) -> Self {
        Self {
            identifier,
            firstname: None,
            lastname: None,
            email: None,
            mirian: None,
            creation_date: now,
            modification: now,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modification = now;
    }
}
