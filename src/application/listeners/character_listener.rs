//! Character creation rule
//!
//! Every new character starts with maximum intelligence. Characters created
//! during the March 2022 launch week also get their life set to 20.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc};

use super::CharacterListener;
use crate::application::ports::outbound::ClockPort;
use crate::domain::entities::{Character, MAX_STAT};

/// Intelligence granted to every new character
pub const CREATION_INTELLIGENCE: i32 = MAX_STAT;

/// Life granted inside the launch window
pub const LAUNCH_LIFE: i32 = 20;

/// Offset of the zone the launch window is expressed in (UTC+01:00)
pub const REFERENCE_UTC_OFFSET_SECS: i64 = 3600;

/// First day of the launch window, inclusive, in the reference zone
pub const LAUNCH_FIRST_DAY: (i32, u32, u32) = (2022, 3, 7);

/// Day the launch window closes, exclusive, in the reference zone
pub const LAUNCH_END_DAY: (i32, u32, u32) = (2022, 3, 10);

/// Applies the creation rule using the injected clock
pub struct CreationBonusListener {
    clock: Arc<dyn ClockPort>,
}

impl CreationBonusListener {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }
}

impl CharacterListener for CreationBonusListener {
    fn character_created(&self, character: &mut Character) {
        let launch = in_launch_window(self.clock.now());
        character.intelligence = Some(CREATION_INTELLIGENCE);
        if launch {
            character.life = Some(LAUNCH_LIFE);
        }
        tracing::debug!(
            identifier = %character.identifier,
            launch_bonus = launch,
            "Applied creation rule"
        );
    }
}

/// Whether `now` falls in [2022-03-07T00:00, 2022-03-10T00:00) at UTC+01:00
pub fn in_launch_window(now: DateTime<Utc>) -> bool {
    // Both bounds sit on midnight, so comparing calendar days is exact
    let local = now.naive_utc() + Duration::seconds(REFERENCE_UTC_OFFSET_SECS);
    let day = (local.year(), local.month(), local.day());
    day >= LAUNCH_FIRST_DAY && day < LAUNCH_END_DAY
}
