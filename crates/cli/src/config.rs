//! Configuration management for the CLI
//!
//! Settings come from an optional `~/.config/eup/config.json`, overlaid by
//! `EUP_*` environment variables. Command-line flags win over both.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use usage_lib::predictor::{DEFAULT_CURRENCY, DEFAULT_HORIZON_DAYS, DEFAULT_RATE_PER_KWH};

/// CLI configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Tariff in currency units per kWh
    #[serde(default = "default_rate_per_kwh")]
    pub rate_per_kwh: f64,

    /// Currency code shown next to amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Default forecast horizon
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_rate_per_kwh() -> f64 {
    DEFAULT_RATE_PER_KWH
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rate_per_kwh: default_rate_per_kwh(),
            currency: default_currency(),
            horizon_days: default_horizon_days(),
            log_json: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from the user config file and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path().ok())
    }

    /// Load configuration from an explicit file (if any) and environment
    pub fn load_from(path: Option<PathBuf>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config = builder
            .add_source(config::Environment::with_prefix("EUP").try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to parse configuration")?;
        config.validate().context("Invalid configuration")?;

        Ok(config)
    }

    /// Check values the predictor cannot use
    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.horizon_days > 0, "horizon_days must be at least 1");
        anyhow::ensure!(
            self.rate_per_kwh.is_finite() && self.rate_per_kwh >= 0.0,
            "rate_per_kwh must be a non-negative number"
        );
        Ok(())
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("eup").join("config.json"))
    }
}
