//! Pay counter session — the API a front-end drives.
//!
//! Owns the user's raw input per mode, the currency, the hourly counter,
//! the latest yearly breakdown and the refresh scheduler. Every mutation
//! goes through the methods below; front-ends read a `Snapshot`.

use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::hourly::HourlyCounter;
use super::progress::{compute_earnings, compute_progress};
use super::scheduler::{RefreshScheduler, Tick};
use crate::types::{
    Currency, InvalidRateError, Mode, Period, PeriodEarnings, PeriodLine, RateInput, Snapshot,
};

pub struct PayCounter<C: Clock = SystemClock> {
    clock: C,
    scheduler: RefreshScheduler,
    mode: Mode,
    currency: Currency,
    hourly_input: String,
    yearly_input: String,
    hourly_rate: Option<RateInput>,
    yearly_rate: Option<RateInput>,
    hourly: HourlyCounter<C::Tz>,
    period_earnings: PeriodEarnings,
    input_error: Option<String>,
}

impl PayCounter<SystemClock> {
    /// Session on the system clock with default refresh periods.
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock, RefreshScheduler::default())
    }
}

impl<C: Clock> PayCounter<C> {
    /// No Tokio runtime is needed until `next_tick()` is awaited.
    pub fn new(clock: C, scheduler: RefreshScheduler) -> Self {
        Self {
            clock,
            scheduler,
            mode: Mode::default(),
            currency: Currency::default(),
            hourly_input: String::new(),
            yearly_input: String::new(),
            hourly_rate: None,
            yearly_rate: None,
            hourly: HourlyCounter::new(),
            period_earnings: PeriodEarnings::default(),
            input_error: None,
        }
    }

    // -- Accessors --------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_running(&self) -> bool {
        self.hourly.is_running()
    }

    pub fn hourly_earnings(&self) -> f64 {
        self.hourly.earnings()
    }

    pub fn period_earnings(&self) -> PeriodEarnings {
        self.period_earnings
    }

    pub fn input_error(&self) -> Option<&str> {
        self.input_error.as_deref()
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    fn yearly_salary(&self) -> Option<f64> {
        self.yearly_rate.and_then(|r| r.positive())
    }

    // -- Input ------------------------------------------------------------

    /// Take new input text for the active mode.
    ///
    /// Returns `false` if the input is locked (hourly counter running).
    pub fn set_input(&mut self, text: &str) -> bool {
        let rate = RateInput::parse(self.mode, text);
        match self.mode {
            Mode::Hourly => {
                if self.hourly.is_running() {
                    debug!("Hourly input ignored while counter is running");
                    return false;
                }
                self.hourly_input = text.to_string();
                // Keep a non-positive value so `start()` can report it.
                self.hourly_rate = rate;
                if rate.and_then(|r| r.positive()).is_none() {
                    self.hourly.reset();
                }
            }
            Mode::Yearly => {
                self.yearly_input = text.to_string();
                self.yearly_rate = rate;
                self.refresh_yearly_timer();
            }
        }
        debug!(mode = %self.mode, rate = ?rate.map(|r| r.value()), "Input updated");
        true
    }

    /// Arm the yearly timer for a usable salary, otherwise clear the breakdown.
    fn refresh_yearly_timer(&mut self) {
        if self.yearly_salary().is_some() {
            self.recompute_yearly();
            self.scheduler.arm(Mode::Yearly);
        } else {
            self.scheduler.cancel(Mode::Yearly);
            self.period_earnings = PeriodEarnings::default();
        }
    }

    /// Change the display currency. Locked while the hourly counter runs.
    pub fn select_currency(&mut self, code: &str) -> bool {
        if self.mode == Mode::Hourly && self.hourly.is_running() {
            debug!(code, "Currency change ignored while counter is running");
            return false;
        }
        match code.parse::<Currency>() {
            Ok(currency) => {
                self.currency = currency;
                info!(currency = currency.code(), "Currency selected");
                true
            }
            Err(e) => {
                warn!(error = %e, "Currency not changed");
                false
            }
        }
    }

    /// Switch tabs, cancelling the timer of the mode being left.
    pub fn switch_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.input_error = None;
        self.scheduler.cancel(self.mode);
        match self.mode {
            Mode::Hourly => self.hourly.reset(),
            Mode::Yearly => self.period_earnings = PeriodEarnings::default(),
        }
        self.mode = mode;
        if mode == Mode::Yearly {
            self.refresh_yearly_timer();
        }
        info!(%mode, "Mode switched");
    }

    // -- Hourly controls --------------------------------------------------

    /// Start the hourly counter, replacing any previous hourly timer.
    pub fn start(&mut self) -> Result<(), InvalidRateError> {
        let rate = self.hourly_rate.map(|r| r.value());
        if let Err(e) = self.hourly.start(rate, self.clock.now()) {
            self.input_error = Some(e.to_string());
            return Err(e);
        }
        self.input_error = None;
        self.scheduler.arm(Mode::Hourly);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.scheduler.cancel(Mode::Hourly);
        self.hourly.stop();
    }

    /// Start when idle, stop when running.
    pub fn toggle(&mut self) -> Result<(), InvalidRateError> {
        if self.hourly.is_running() {
            self.stop();
            Ok(())
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) {
        self.scheduler.cancel(Mode::Hourly);
        self.hourly.reset();
    }

    // -- Ticks ------------------------------------------------------------

    fn recompute_yearly(&mut self) {
        let Some(salary) = self.yearly_salary() else {
            return;
        };
        let progress = compute_progress(&self.clock.now());
        if !progress.is_within_bounds() {
            debug!(?progress, "Period progress outside [0, 1)");
        }
        self.period_earnings = compute_earnings(salary, &progress);
    }

    /// Apply one scheduler tick.
    pub fn on_tick(&mut self, tick: Tick) {
        match tick {
            Tick::Hourly(_) => {
                self.hourly.tick(self.clock.now());
            }
            Tick::Yearly(_) => self.recompute_yearly(),
        }
    }

    /// Wait for the next armed timer and apply it.
    pub async fn next_tick(&mut self) -> Tick {
        let tick = self.scheduler.next().await;
        self.on_tick(tick);
        tick
    }

    /// Cancel every timer. Dropping the session has the same effect.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
        self.hourly.stop();
        info!(earnings = format!("{:.2}", self.hourly.earnings()), "Session closed");
    }

    // -- Output -----------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        let breakdown = match (self.mode, self.yearly_salary()) {
            (Mode::Yearly, Some(salary)) => Period::ALL
                .iter()
                .map(|&period| {
                    let amount = period.of_earnings(&self.period_earnings);
                    PeriodLine {
                        period,
                        amount,
                        progress_pct: amount / (salary / period.yearly_divisor()) * 100.0,
                        caption: period.caption(),
                    }
                })
                .collect(),
            _ => Vec::new(),
        };

        Snapshot {
            mode: self.mode,
            currency: self.currency,
            symbol: self.currency.symbol(),
            input: match self.mode {
                Mode::Hourly => self.hourly_input.clone(),
                Mode::Yearly => self.yearly_input.clone(),
            },
            is_running: self.hourly.is_running(),
            input_error: self.input_error.clone(),
            hourly_earnings: self.hourly.earnings(),
            breakdown,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
