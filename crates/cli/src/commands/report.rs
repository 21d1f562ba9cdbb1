//! Combined report of every predictor output

use anyhow::Result;
use serde::Serialize;
use usage_lib::{
    AnomalyRecord, ConsumptionForecast, PatternSummary, PaymentRecommendation, RunwayEstimate,
    UsagePredictor,
};

use super::{payments, usage, Settings};
use crate::output::{print_json, OutputFormat};

/// Everything the dashboard shows for one series
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UsageReport {
    records: usize,
    #[serde(rename = "averageDailyKWh")]
    average_daily_kwh: f64,
    forecast: ConsumptionForecast,
    patterns: PatternSummary,
    recommendation: PaymentRecommendation,
    runway: RunwayEstimate,
    anomalies: Vec<AnomalyRecord>,
}

/// Show the full report
pub fn show_report(
    predictor: &UsagePredictor,
    settings: &Settings,
    balance: f64,
    days: Option<u32>,
) -> Result<()> {
    let report = UsageReport {
        records: predictor.len(),
        average_daily_kwh: predictor.average_daily_consumption(),
        forecast: predictor.predict_consumption(days.unwrap_or(settings.horizon_days)),
        patterns: predictor.analyze_patterns(),
        recommendation: predictor.recommend_payment_amount_in(
            balance,
            settings.rate_per_kwh,
            &settings.currency,
        ),
        runway: predictor.calculate_runway(balance, settings.rate_per_kwh),
        anomalies: predictor.detect_anomalies(),
    };

    match settings.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            usage::print_forecast_table(predictor, &report.forecast);
            usage::print_patterns_table(&report.patterns);
            payments::print_recommendation_table(&report.recommendation, settings);
            payments::print_runway_table(&report.runway, settings, balance);
            usage::print_anomalies_table(&report.anomalies);
        }
    }

    Ok(())
}
