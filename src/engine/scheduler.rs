//! Refresh scheduler — cancellable periodic timers for both modes.
//!
//! Each mode owns at most one `tokio::time::Interval`. Arming a mode
//! replaces its previous interval; cancelling drops it. Intervals are
//! created lazily inside `next()`, so only awaiting needs a runtime. `next()` awaits
//! whichever armed slot fires first, so ticks are delivered one at a time
//! on the caller's task and never overlap.

use std::time::Duration;
use tokio::time::{interval, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::types::Mode;

/// Default hourly refresh period.
pub const HOURLY_TICK: Duration = Duration::from_millis(100);
/// Default yearly refresh period.
pub const YEARLY_TICK: Duration = Duration::from_millis(1000);

/// A fired timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Hourly(Instant),
    Yearly(Instant),
}

impl Tick {
    pub fn mode(&self) -> Mode {
        match self {
            Tick::Hourly(_) => Mode::Hourly,
            Tick::Yearly(_) => Mode::Yearly,
        }
    }
}

/// State of one mode's timer.
///
/// `arm` only records intent; the `Interval` is created on the first poll
/// of `next()`, so arming and cancelling work outside a Tokio runtime.
#[derive(Debug, Default)]
enum Slot {
    #[default]
    Idle,
    Armed,
    Running(Interval),
}

impl Slot {
    fn is_idle(&self) -> bool {
        matches!(self, Slot::Idle)
    }
}

pub struct RefreshScheduler {
    hourly_period: Duration,
    yearly_period: Duration,
    hourly: Slot,
    yearly: Slot,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(HOURLY_TICK, YEARLY_TICK)
    }
}

impl RefreshScheduler {
    /// Both periods must be non-zero.
    pub fn new(hourly_period: Duration, yearly_period: Duration) -> Self {
        Self {
            hourly_period,
            yearly_period,
            hourly: Slot::Idle,
            yearly: Slot::Idle,
        }
    }

    pub fn period(&self, mode: Mode) -> Duration {
        match mode {
            Mode::Hourly => self.hourly_period,
            Mode::Yearly => self.yearly_period,
        }
    }

    fn slot(&mut self, mode: Mode) -> &mut Slot {
        match mode {
            Mode::Hourly => &mut self.hourly,
            Mode::Yearly => &mut self.yearly,
        }
    }

    /// Start (or restart) the timer for `mode`. The first tick is immediate.
    pub fn arm(&mut self, mode: Mode) {
        let replaced = !std::mem::replace(self.slot(mode), Slot::Armed).is_idle();
        debug!(%mode, replaced, period_ms = self.period(mode).as_millis() as u64, "Timer armed");
    }

    pub fn cancel(&mut self, mode: Mode) {
        if !std::mem::take(self.slot(mode)).is_idle() {
            debug!(%mode, "Timer cancelled");
        }
    }

    pub fn cancel_all(&mut self) {
        self.cancel(Mode::Hourly);
        self.cancel(Mode::Yearly);
    }

    pub fn is_armed(&self, mode: Mode) -> bool {
        match mode {
            Mode::Hourly => !self.hourly.is_idle(),
            Mode::Yearly => !self.yearly.is_idle(),
        }
    }

    /// Wait for the next tick of any armed timer.
    ///
    /// Pends forever when nothing is armed. Cancel-safe: dropping the
    /// future loses no tick.
    pub async fn next(&mut self) -> Tick {
        tokio::select! {
            at = next_in(&mut self.hourly, self.hourly_period) => Tick::Hourly(at),
            at = next_in(&mut self.yearly, self.yearly_period) => Tick::Yearly(at),
        }
    }
}

async fn next_in(slot: &mut Slot, period: Duration) -> Instant {
    if let Slot::Armed = slot {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        *slot = Slot::Running(timer);
    }
    match slot {
        Slot::Running(timer) => timer.tick().await,
        _ => std::future::pending().await,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
