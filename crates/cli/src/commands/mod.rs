//! Subcommand implementations

pub mod payments;
pub mod report;
pub mod sample;
pub mod usage;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use usage_lib::{load_series, sample::demo_series, UsagePredictor};

use crate::output::OutputFormat;

/// Length of the built-in demo series
pub const DEMO_DAYS: usize = 30;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Settings {
    pub rate_per_kwh: f64,
    pub currency: String,
    pub horizon_days: u32,
    pub format: OutputFormat,
}

/// Build a predictor from a history file, or the demo series ending today
pub fn load_predictor(data: Option<&Path>, rate_per_kwh: f64) -> Result<UsagePredictor> {
    match data {
        Some(path) => {
            let records = load_series(path)
                .with_context(|| format!("Failed to load usage data from {}", path.display()))?;
            let predictor = UsagePredictor::with_source(path.display().to_string());
            predictor.load_historical_data(records);
            Ok(predictor)
        }
        None => {
            let today = chrono::Local::now().date_naive();
            info!(days = DEMO_DAYS, "No usage data given, using demo series");
            let predictor = UsagePredictor::with_source("demo");
            predictor.load_historical_data(demo_series(today, DEMO_DAYS, rate_per_kwh));
            Ok(predictor)
        }
    }
}
