//! Shared types for the pay counter.
//!
//! Rates, modes, currencies, the per-period breakdown shapes and the
//! display snapshot. Engine and front-end modules depend on these without
//! depending on each other.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which counter the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Hourly,
    Yearly,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Hourly => write!(f, "hourly"),
            Mode::Yearly => write!(f, "yearly"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hourly" | "hour" | "rate" => Ok(Mode::Hourly),
            "yearly" | "year" | "salary" => Ok(Mode::Yearly),
            other => anyhow::bail!("Unknown mode: {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Display currency. Purely cosmetic: amounts are never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Gbp,
    Eur,
    Usd,
}

impl Currency {
    /// Every selectable currency, in menu order.
    pub const ALL: &'static [Currency] = &[Currency::Gbp, Currency::Eur, Currency::Usd];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Gbp => "£",
            Currency::Eur => "€",
            Currency::Usd => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.symbol())
    }
}

/// Parse a currency code (case-insensitive). Symbols are accepted too.
impl std::str::FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Currency::ALL
            .iter()
            .find(|c| c.code().eq_ignore_ascii_case(s) || c.symbol() == s)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown currency: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Rate input
// ---------------------------------------------------------------------------

/// A user-supplied rate, tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RateInput {
    /// Currency per hour.
    HourlyRate(f64),
    /// Currency per year.
    YearlySalary(f64),
}

impl RateInput {
    /// Interpret raw input text for the given mode.
    ///
    /// Text that is not a finite number yields `None` ("unset"). A parsed
    /// but non-positive number is returned as-is so that `start()` can
    /// reject it with a proper error.
    pub fn parse(mode: Mode, text: &str) -> Option<Self> {
        let value = text.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(match mode {
            Mode::Hourly => RateInput::HourlyRate(value),
            Mode::Yearly => RateInput::YearlySalary(value),
        })
    }

    pub fn value(&self) -> f64 {
        match self {
            RateInput::HourlyRate(v) | RateInput::YearlySalary(v) => *v,
        }
    }

    /// Only strictly positive rates produce earnings.
    pub fn is_set(&self) -> bool {
        self.value() > 0.0
    }

    /// The value if the rate is usable, `None` otherwise.
    pub fn positive(&self) -> Option<f64> {
        self.is_set().then(|| self.value())
    }
}

// ---------------------------------------------------------------------------
// Period breakdowns
// ---------------------------------------------------------------------------

/// Elapsed fraction of the current calendar year/month/week/day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodProgress {
    pub year: f64,
    pub month: f64,
    pub week: f64,
    pub day: f64,
}

impl PeriodProgress {
    /// Whether every fraction lies in `[0, 1)`.
    ///
    /// The 365-day year and DST-length days can push `year`/`day` to or
    /// past 1.0 on the boundaries; anything else points at a clock problem.
    pub fn is_within_bounds(&self) -> bool {
        [self.year, self.month, self.week, self.day]
            .iter()
            .all(|f| (0.0..1.0).contains(f))
    }
}

/// Money earned so far in each period, in the same shape as `PeriodProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodEarnings {
    pub year: f64,
    pub month: f64,
    pub week: f64,
    pub day: f64,
}

/// One of the four calendar periods in the yearly breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Year,
    Month,
    Week,
    Day,
}

impl Period {
    pub const ALL: &'static [Period] = &[Period::Year, Period::Month, Period::Week, Period::Day];

    /// Fixed share of the yearly salary attributed to one period.
    pub fn yearly_divisor(&self) -> f64 {
        match self {
            Period::Year => 1.0,
            Period::Month => 12.0,
            Period::Week => 52.0,
            Period::Day => 365.0,
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Period::Year => "Since January 1st",
            Period::Month => "Since start of month",
            Period::Week => "Since Sunday",
            Period::Day => "Since midnight",
        }
    }

    pub fn of_progress(&self, p: &PeriodProgress) -> f64 {
        match self {
            Period::Year => p.year,
            Period::Month => p.month,
            Period::Week => p.week,
            Period::Day => p.day,
        }
    }

    pub fn of_earnings(&self, e: &PeriodEarnings) -> f64 {
        match self {
            Period::Year => e.year,
            Period::Month => e.month,
            Period::Week => e.week,
            Period::Day => e.day,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year => write!(f, "This Year"),
            Period::Month => write!(f, "This Month"),
            Period::Week => write!(f, "This Week"),
            Period::Day => write!(f, "This Day"),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One row of the yearly breakdown as it should be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodLine {
    pub period: Period,
    pub amount: f64,
    /// Progress through the period, in percent.
    pub progress_pct: f64,
    pub caption: &'static str,
}

/// Everything a front-end needs to draw the counter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub currency: Currency,
    pub symbol: &'static str,
    pub input: String,
    pub is_running: bool,
    pub input_error: Option<String>,
    pub hourly_earnings: f64,
    /// Empty unless a valid yearly salary is set.
    pub breakdown: Vec<PeriodLine>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Raised by `start()` when the hourly rate is missing or not positive.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Please enter a valid hourly rate")]
pub struct InvalidRateError {
    /// The rejected value, `None` when no rate was entered.
    pub rate: Option<f64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
