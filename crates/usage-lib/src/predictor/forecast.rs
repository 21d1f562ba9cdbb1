//! Short-horizon consumption forecasting
//!
//! Extrapolates a least squares trend line one record past the end of the
//! series. Series too short for a stable slope get a fixed default forecast.

use super::regression::{fit_linear_trend, LinearFit};
use crate::models::UsageRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default forecast horizon in days
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Minimum number of records before regression is attempted
pub const MIN_RECORDS_FOR_REGRESSION: usize = 3;

/// Daily consumption reported when history is too short
pub const FALLBACK_DAILY_KWH: f64 = 18.5;

/// Weekly consumption reported when history is too short
pub const FALLBACK_WEEKLY_KWH: f64 = 129.5;

/// Slope (kWh per day) beyond which usage counts as trending
const TREND_SLOPE_THRESHOLD: f64 = 0.1;

const DAYS_PER_MONTH: f64 = 30.0;

const HIGH_CONFIDENCE_RECORDS: usize = 30;
const MEDIUM_CONFIDENCE_RECORDS: usize = 14;

/// Direction of the consumption trend line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn from_slope(slope: f64) -> Self {
        if slope > TREND_SLOPE_THRESHOLD {
            Trend::Increasing
        } else if slope < -TREND_SLOPE_THRESHOLD {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence tag derived from the amount of history available
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn from_sample_count(count: usize) -> Self {
        if count >= HIGH_CONFIDENCE_RECORDS {
            Confidence::High
        } else if count >= MEDIUM_CONFIDENCE_RECORDS {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicted consumption for the coming days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionForecast {
    #[serde(rename = "dailyKWh")]
    pub daily_kwh: f64,
    /// Consumption over `horizon_days`
    #[serde(rename = "weeklyKWh")]
    pub weekly_kwh: f64,
    #[serde(rename = "monthlyKWh")]
    pub monthly_kwh: f64,
    pub horizon_days: u32,
    pub trend: Trend,
    pub confidence: Confidence,
    /// Fitted trend line; `None` for the fallback forecast
    pub fit: Option<LinearFit>,
}

impl ConsumptionForecast {
    /// Fixed forecast used when history is too short to regress on
    pub fn fallback() -> Self {
        Self {
            daily_kwh: FALLBACK_DAILY_KWH,
            weekly_kwh: FALLBACK_WEEKLY_KWH,
            monthly_kwh: FALLBACK_DAILY_KWH * DAYS_PER_MONTH,
            horizon_days: DEFAULT_HORIZON_DAYS,
            trend: Trend::Stable,
            confidence: Confidence::Low,
            fit: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fit.is_none()
    }
}

/// Forecast consumption over `horizon_days` from a date-ascending series
pub fn predict_consumption(records: &[UsageRecord], horizon_days: u32) -> ConsumptionForecast {
    if records.len() < MIN_RECORDS_FOR_REGRESSION {
        return ConsumptionForecast::fallback();
    }

    let values: Vec<f64> = records.iter().map(|r| r.kilowatt_hours).collect();
    let Some(fit) = fit_linear_trend(&values) else {
        return ConsumptionForecast::fallback();
    };

    let n = values.len();
    let next_day = fit.predict(n as f64);

    ConsumptionForecast {
        daily_kwh: next_day.max(0.0),
        weekly_kwh: (next_day * horizon_days as f64).max(0.0),
        monthly_kwh: (next_day * DAYS_PER_MONTH).max(0.0),
        horizon_days,
        trend: Trend::from_slope(fit.slope),
        confidence: Confidence::from_sample_count(n),
        fit: Some(fit),
    }
}
