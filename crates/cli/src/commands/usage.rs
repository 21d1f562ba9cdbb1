//! Consumption commands: forecast, patterns, anomalies

use anyhow::Result;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};
use usage_lib::{AnomalyRecord, ConsumptionForecast, PatternSummary, UsagePredictor};

use super::Settings;
use crate::output::{
    color_confidence, color_trend, format_kwh, print_heading, print_info, print_json, print_warning,
    OutputFormat,
};

/// Row for the anomalies table
#[derive(Tabled)]
struct AnomalyRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Usage")]
    usage: String,
    #[tabled(rename = "Deviation")]
    deviation: String,
    #[tabled(rename = "Z-Score")]
    z_score: String,
    #[tabled(rename = "Type")]
    kind: String,
}

/// Show consumption forecast
pub fn show_forecast(
    predictor: &UsagePredictor,
    settings: &Settings,
    days: Option<u32>,
) -> Result<()> {
    let forecast = predictor.predict_consumption(days.unwrap_or(settings.horizon_days));

    match settings.format {
        OutputFormat::Json => print_json(&forecast)?,
        OutputFormat::Table => print_forecast_table(predictor, &forecast),
    }

    Ok(())
}

pub(crate) fn print_forecast_table(predictor: &UsagePredictor, forecast: &ConsumptionForecast) {
    print_heading("Consumption Forecast");
    println!("History:                {} days", predictor.len());
    println!(
        "Average:                {}/day",
        format_kwh(predictor.average_daily_consumption())
    );
    println!();

    println!("Next day:               {}", format_kwh(forecast.daily_kwh).cyan());
    println!(
        "{:<24}{}",
        format!("Next {} days:", forecast.horizon_days),
        format_kwh(forecast.weekly_kwh).cyan()
    );
    println!("Next 30 days:           {}", format_kwh(forecast.monthly_kwh).cyan());
    println!("Trend:                  {}", color_trend(forecast.trend));
    println!("Confidence:             {}", color_confidence(forecast.confidence));

    match &forecast.fit {
        Some(fit) => println!(
            "Trend line:             {}",
            format!("{:+.3} kWh/day from {:.2} kWh", fit.slope, fit.intercept).dimmed()
        ),
        None => print_warning("Less than 3 days of history, showing the default forecast"),
    }
    println!();
}

/// Show weekday/weekend pattern
pub fn show_patterns(predictor: &UsagePredictor, settings: &Settings) -> Result<()> {
    let summary = predictor.analyze_patterns();

    match settings.format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Table => print_patterns_table(&summary),
    }

    Ok(())
}

pub(crate) fn print_patterns_table(summary: &PatternSummary) {
    print_heading("Usage Patterns");
    println!("Weekday average:        {}", format_kwh(summary.weekday_avg_kwh));
    println!("Weekend average:        {}", format_kwh(summary.weekend_avg_kwh));
    println!(
        "{} {} ({:.1}% difference)",
        "Pattern:".bold(),
        summary.dominant_pattern.label().cyan().bold(),
        summary.percent_difference
    );
    println!();
}

/// Show anomalous days
pub fn show_anomalies(predictor: &UsagePredictor, settings: &Settings) -> Result<()> {
    let anomalies = predictor.detect_anomalies();

    match settings.format {
        OutputFormat::Json => print_json(&anomalies)?,
        OutputFormat::Table => print_anomalies_table(&anomalies),
    }

    Ok(())
}

pub(crate) fn print_anomalies_table(anomalies: &[AnomalyRecord]) {
    print_heading("Anomalies");

    if anomalies.is_empty() {
        print_info("No unusual consumption detected");
        println!();
        return;
    }

    let rows: Vec<AnomalyRow> = anomalies
        .iter()
        .map(|a| AnomalyRow {
            date: a.date.format("%b %-d, %Y").to_string(),
            usage: format_kwh(a.kilowatt_hours),
            deviation: format!("{:+.1}%", a.percent_deviation_from_mean),
            z_score: format!("{:.2}", a.z_score),
            kind: a.kind.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
    println!();
}
