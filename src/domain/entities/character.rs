//! Character entity - playable figures described by caste, knowledge and stats

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::domain::value_objects::Identifier;

/// Upper bound shared by the intelligence and life stats
pub const MAX_STAT: i32 = 250;

/// A character record
///
/// Descriptive and stat fields are optional so that a record can be built up
/// by successive partial payloads; the `required` rules below decide when it
/// is complete enough to be stored.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Character {
    /// Assigned once at creation, never recomputed
    pub identifier: Identifier,

    #[validate(required, length(min = 1, max = 255))]
    pub kind: Option<String>,
    #[validate(required, length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub surname: Option<String>,
    #[validate(required, length(min = 1, max = 255))]
    pub caste: Option<String>,
    #[validate(required, length(min = 1, max = 255))]
    pub knowledge: Option<String>,

    // Stats
    #[validate(required, range(min = 1, max = 250))]
    pub intelligence: Option<i32>,
    #[validate(required, range(min = 1, max = 250))]
    pub life: Option<i32>,

    /// Path or URL of the character picture
    #[validate(length(max = 255))]
    pub image: Option<String>,

    pub creation: DateTime<Utc>,
    /// Last successful mutation
    pub modification: DateTime<Utc>,
}

impl Character {
    /// An empty record stamped with its identity and creation instant
    pub fn new(identifier: Identifier, now: DateTime<Utc>) -> Self {
        Self {
            identifier,
            kind: None,
            name: None,
            surname: None,
            caste: None,
            knowledge: None,
            intelligence: None,
            life: None,
            image: None,
            creation: now,
            modification: now,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modification = now;
    }
}
