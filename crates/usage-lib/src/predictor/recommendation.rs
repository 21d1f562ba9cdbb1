//! Prepaid top-up recommendations
//!
//! Converts a consumption forecast into whole-currency top-up amounts for
//! several coverage periods, plus a short insight message keyed on the
//! consumption trend.

use super::forecast::{Confidence, ConsumptionForecast, Trend};
use super::regression::round_to;
use serde::{Deserialize, Serialize};

/// Default tariff in currency units per kWh
pub const DEFAULT_RATE_PER_KWH: f64 = 20.0;

/// Default currency code used in insight messages
pub const DEFAULT_CURRENCY: &str = "KES";

/// Safety buffer applied to the recommended weekly top-up (10%)
pub const SAFETY_BUFFER_FACTOR: f64 = 1.10;

/// Days of consumption the minimum top-up must cover
const MINIMUM_COVER_DAYS: f64 = 3.0;

/// Weekly cost multipliers suggested by the insight message
const INCREASING_TOP_UP_FACTOR: f64 = 1.2;
const DECREASING_TOP_UP_FACTOR: f64 = 0.9;
const STABLE_TOP_UP_FACTOR: f64 = 1.0;

/// Top-up suggestion for one coverage period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecommendation {
    pub period_days: u32,
    pub amount: u64,
    pub reason: String,
    pub confidence: Confidence,
}

impl PeriodRecommendation {
    /// Human-readable period, e.g. "7 days"
    pub fn period_label(&self) -> String {
        format!("{} days", self.period_days)
    }
}

/// Recommended top-up amounts derived from a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecommendation {
    /// One week of predicted cost plus the safety buffer
    pub recommended_amount: u64,
    /// Three days of predicted cost
    pub minimum_amount: u64,
    /// Two weeks of predicted cost
    pub optimal_amount: u64,
    /// A full month of predicted cost
    pub economical_amount: u64,
    pub per_period_breakdown: Vec<PeriodRecommendation>,
    pub insight_message: String,
    /// Days the current balance covers at the predicted daily cost, one
    /// decimal place; `None` when nothing is being consumed
    pub balance_cover_days: Option<f64>,
}

/// Build a top-up recommendation from a 7-day forecast
pub fn recommend_payment_amount(
    forecast: &ConsumptionForecast,
    current_balance: f64,
    rate_per_kwh: f64,
    currency: &str,
) -> PaymentRecommendation {
    let daily_cost = forecast.daily_kwh * rate_per_kwh;
    let weekly_cost = forecast.weekly_kwh * rate_per_kwh;
    let monthly_cost = forecast.monthly_kwh * rate_per_kwh;

    let per_period_breakdown = vec![
        PeriodRecommendation {
            period_days: 7,
            amount: ceil_amount(weekly_cost),
            reason: format!("Based on predicted {:.2} kWh usage", forecast.weekly_kwh),
            confidence: forecast.confidence,
        },
        PeriodRecommendation {
            period_days: 14,
            amount: ceil_amount(weekly_cost * 2.0),
            reason: "Two-week security buffer".to_string(),
            confidence: forecast.confidence,
        },
        PeriodRecommendation {
            period_days: 30,
            amount: ceil_amount(monthly_cost),
            reason: "Full month coverage".to_string(),
            confidence: forecast.confidence,
        },
    ];

    let balance_cover_days = if daily_cost > 0.0 {
        Some(round_to(current_balance.max(0.0) / daily_cost, 1))
    } else {
        None
    };

    PaymentRecommendation {
        recommended_amount: ceil_amount(weekly_cost * SAFETY_BUFFER_FACTOR),
        minimum_amount: ceil_amount(daily_cost * MINIMUM_COVER_DAYS),
        optimal_amount: ceil_amount(weekly_cost * 2.0),
        economical_amount: ceil_amount(monthly_cost),
        per_period_breakdown,
        insight_message: insight_message(forecast, rate_per_kwh, currency),
        balance_cover_days,
    }
}

/// Trend-dependent advice on how much to top up for the week
pub fn insight_message(
    forecast: &ConsumptionForecast,
    rate_per_kwh: f64,
    currency: &str,
) -> String {
    let weekly_cost = forecast.weekly_kwh * rate_per_kwh;
    match forecast.trend {
        Trend::Increasing => format!(
            "Your consumption is trending upward. Consider topping up {} {} to cover increasing usage.",
            currency,
            ceil_amount(weekly_cost * INCREASING_TOP_UP_FACTOR)
        ),
        Trend::Decreasing => format!(
            "Great! Your consumption is decreasing. {} {} should be sufficient.",
            currency,
            ceil_amount(weekly_cost * DECREASING_TOP_UP_FACTOR)
        ),
        Trend::Stable => format!(
            "Your usage is stable at {:.2} kWh/day. Top up {} {} for the week.",
            forecast.daily_kwh,
            currency,
            ceil_amount(weekly_cost * STABLE_TOP_UP_FACTOR)
        ),
    }
}

/// Round a cost up to whole currency units, never below zero
fn ceil_amount(cost: f64) -> u64 {
    if cost.is_finite() && cost > 0.0 {
        cost.ceil() as u64
    } else {
        0
    }
}
