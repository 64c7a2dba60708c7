//! Hourly counter — stopwatch-style accrual from a fixed start instant.
//!
//! Earnings are recomputed from the start timestamp on every tick rather
//! than summed per tick, so late or skipped timer firings never drift the
//! total.

use chrono::{DateTime, TimeZone};
use tracing::{debug, info};

use crate::types::InvalidRateError;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Earnings for `elapsed_ms` at `rate` per hour.
pub fn earnings_for(rate: f64, elapsed_ms: i64) -> f64 {
    rate * elapsed_ms.max(0) as f64 / MS_PER_HOUR
}

// ---------------------------------------------------------------------------
// Counter state
// ---------------------------------------------------------------------------

/// Raw counter state. `start_timestamp` is `Some` exactly when running.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterState<Tz: TimeZone> {
    pub is_running: bool,
    pub start_timestamp: Option<DateTime<Tz>>,
    pub accumulated_earnings: f64,
}

impl<Tz: TimeZone> Default for CounterState<Tz> {
    fn default() -> Self {
        Self {
            is_running: false,
            start_timestamp: None,
            accumulated_earnings: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Hourly counter
// ---------------------------------------------------------------------------

/// Idle/Running state machine around a `CounterState`.
#[derive(Debug, Clone)]
pub struct HourlyCounter<Tz: TimeZone> {
    state: CounterState<Tz>,
    /// Rate captured at `start()`; the input is locked while running.
    rate: f64,
    /// Earnings carried over from earlier runs (frozen at `stop()`).
    banked: f64,
}

impl<Tz: TimeZone> Default for HourlyCounter<Tz> {
    fn default() -> Self {
        Self {
            state: CounterState::default(),
            rate: 0.0,
            banked: 0.0,
        }
    }
}

impl<Tz: TimeZone> HourlyCounter<Tz> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CounterState<Tz> {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn earnings(&self) -> f64 {
        self.state.accumulated_earnings
    }

    /// Begin accruing at `rate` per hour from `now`.
    ///
    /// A missing or non-positive rate leaves the counter idle.
    pub fn start(&mut self, rate: Option<f64>, now: DateTime<Tz>) -> Result<(), InvalidRateError> {
        let rate = match rate {
            Some(r) if r > 0.0 && r.is_finite() => r,
            other => {
                debug!(rate = ?other, "Rejected start with invalid rate");
                return Err(InvalidRateError { rate: other });
            }
        };

        self.rate = rate;
        self.banked = self.state.accumulated_earnings;
        self.state.start_timestamp = Some(now);
        self.state.is_running = true;

        info!(rate, banked = self.banked, "Hourly counter started");
        Ok(())
    }

    /// Freeze the counter at its last ticked value.
    pub fn stop(&mut self) {
        if !self.state.is_running {
            return;
        }
        self.state.is_running = false;
        self.state.start_timestamp = None;
        self.banked = self.state.accumulated_earnings;
        info!(
            earnings = format!("{:.2}", self.state.accumulated_earnings),
            "Hourly counter stopped"
        );
    }

    /// Back to idle with nothing earned.
    pub fn reset(&mut self) {
        self.state = CounterState::default();
        self.banked = 0.0;
        self.rate = 0.0;
        debug!("Hourly counter reset");
    }

    /// Recompute earnings at `now`. No-op while idle.
    ///
    /// Never moves the total backwards, even if the wall clock does.
    pub fn tick(&mut self, now: DateTime<Tz>) -> f64 {
        if let Some(start) = &self.state.start_timestamp {
            let elapsed_ms = now.signed_duration_since(start.clone()).num_milliseconds();
            let value = self.banked + earnings_for(self.rate, elapsed_ms);
            self.state.accumulated_earnings = self.state.accumulated_earnings.max(value);
        }
        self.state.accumulated_earnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
