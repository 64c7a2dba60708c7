//! Wall-clock source for the session.
//!
//! The engine functions take `now` as an argument; only the session asks a
//! `Clock` for it, so tests can substitute a fixed or scripted time in a
//! fixed zone.

use chrono::{DateTime, Local, TimeZone};

#[cfg_attr(test, mockall::automock(type Tz = chrono::FixedOffset;))]
pub trait Clock: Send {
    /// Zone whose calendar defines the period boundaries.
    type Tz: TimeZone;

    /// Current instant in the observer's time zone.
    fn now(&self) -> DateTime<Self::Tz>;
}

/// The real system clock, in the machine's local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
