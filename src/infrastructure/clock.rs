//! System clock adapter

use chrono::{DateTime, Utc};

use crate::application::ports::outbound::ClockPort;

/// Wall clock in UTC
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
