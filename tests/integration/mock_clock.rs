//! Manual clock for integration testing.
//!
//! A `Clock` whose time only moves when the test says so. Clones share
//! the same underlying instant, so the test keeps one handle and gives
//! the session another. Times live in a fixed UTC+01:00 zone so results
//! do not depend on the machine's local zone.

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use std::sync::{Arc, Mutex};

use pay_counter::engine::{Clock, PayCounter, RefreshScheduler};

/// Wall-clock time in the test zone.
pub fn wall(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, mi, s)
        .unwrap()
}

#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<FixedOffset>>>,
}

impl ManualClock {
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        Self { now: Arc::new(Mutex::new(now)) }
    }

    pub fn at_wall(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> Self {
        Self::at(wall(y, m, d, h, mi, s))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }

    pub fn set(&self, to: DateTime<FixedOffset>) {
        *self.now.lock().unwrap() = to;
    }
}

impl Clock for ManualClock {
    type Tz = FixedOffset;

    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap()
    }
}

/// A session driven by a `ManualClock`, plus the handle to move time.
pub fn session_at(clock: ManualClock) -> (PayCounter<ManualClock>, ManualClock) {
    let counter = PayCounter::new(clock.clone(), RefreshScheduler::default());
    (counter, clock)
}
