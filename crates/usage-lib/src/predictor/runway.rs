//! Credit runway: how long a prepaid balance lasts at the predicted rate

use super::forecast::ConsumptionForecast;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const CRITICAL_DAYS: u64 = 3;
const WARNING_DAYS: u64 = 7;

/// How soon the balance runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    Warning,
    Safe,
}

impl Urgency {
    pub fn from_days(days_remaining: u64) -> Self {
        if days_remaining < CRITICAL_DAYS {
            Urgency::Critical
        } else if days_remaining < WARNING_DAYS {
            Urgency::Warning
        } else {
            Urgency::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Critical => "critical",
            Urgency::Warning => "warning",
            Urgency::Safe => "safe",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finite runway for a balance that is being drawn down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Runway {
    pub days_remaining: u64,
    pub projected_runout_date: NaiveDate,
    pub urgency: Urgency,
    pub daily_cost: f64,
}

/// Result of a runway calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunwayEstimate {
    /// Predicted daily cost is zero, the balance never runs out
    NoDepletion,
    Depletes(Runway),
}

impl RunwayEstimate {
    pub fn days_remaining(&self) -> Option<u64> {
        match self {
            RunwayEstimate::NoDepletion => None,
            RunwayEstimate::Depletes(runway) => Some(runway.days_remaining),
        }
    }

    pub fn urgency(&self) -> Urgency {
        match self {
            RunwayEstimate::NoDepletion => Urgency::Safe,
            RunwayEstimate::Depletes(runway) => runway.urgency,
        }
    }
}

/// Days until `current_balance` is exhausted, counted from `today`
pub fn calculate_runway(
    forecast: &ConsumptionForecast,
    current_balance: f64,
    rate_per_kwh: f64,
    today: NaiveDate,
) -> RunwayEstimate {
    let daily_cost = forecast.daily_kwh * rate_per_kwh;
    if daily_cost.is_nan() || daily_cost <= 0.0 {
        return RunwayEstimate::NoDepletion;
    }

    // Saturating cast: absurd balances map to u64::MAX days
    let days_remaining = (current_balance.max(0.0) / daily_cost).floor() as u64;
    let projected_runout_date = today
        .checked_add_days(Days::new(days_remaining))
        .unwrap_or(NaiveDate::MAX);

    RunwayEstimate::Depletes(Runway {
        days_remaining,
        projected_runout_date,
        urgency: Urgency::from_days(days_remaining),
        daily_cost,
    })
}
