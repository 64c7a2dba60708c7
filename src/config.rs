//! Configuration loading from TOML with environment overrides.
//!
//! Reads `config.toml` (or the file named by `PAY_COUNTER_CONFIG`) and
//! deserializes it into strongly-typed structs. `PAY_COUNTER_RATE`
//! overrides the starting rate.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::time::Duration;

use crate::types::{Currency, Mode};

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CounterConfig {
    pub name: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub mode: Mode,
    /// Initial rate for `mode`: an hourly rate or a yearly salary.
    #[serde(default)]
    pub rate: Option<f64>,
    /// Start the hourly counter straight away when a rate is configured.
    #[serde(default)]
    pub autostart: bool,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            name: "Pay Counter".to_string(),
            currency: Currency::default(),
            mode: Mode::default(),
            rate: None,
            autostart: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshConfig {
    pub hourly_tick_ms: u64,
    pub yearly_tick_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            hourly_tick_ms: 100,
            yearly_tick_ms: 1000,
        }
    }
}

impl RefreshConfig {
    pub fn hourly_period(&self) -> Duration {
        Duration::from_millis(self.hourly_tick_ms)
    }

    pub fn yearly_period(&self) -> Duration {
        Duration::from_millis(self.yearly_tick_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    /// Emit one JSON snapshot per refresh instead of the status line.
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse and validate configuration text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.refresh.hourly_tick_ms > 0, "refresh.hourly_tick_ms must be > 0");
        ensure!(self.refresh.yearly_tick_ms > 0, "refresh.yearly_tick_ms must be > 0");
        Ok(())
    }

    /// Apply `PAY_COUNTER_RATE` if it is set and numeric.
    pub fn apply_env_overrides(&mut self) {
        if let Some(rate) = std::env::var("PAY_COUNTER_RATE")
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
        {
            self.counter.rate = Some(rate);
        }
    }

    /// Config file path, honouring `PAY_COUNTER_CONFIG`.
    pub fn path_from_env() -> String {
        std::env::var("PAY_COUNTER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
    }
}
