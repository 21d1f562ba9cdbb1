//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use usage_lib::{Confidence, Trend, Urgency};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a section heading
pub fn print_heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "=".repeat(50));
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format energy
pub fn format_kwh(kwh: f64) -> String {
    format!("{:.2} kWh", kwh)
}

/// Format currency
pub fn format_currency(amount: f64, currency: &str) -> String {
    match currency {
        "USD" => format!("${:.2}", amount),
        "EUR" => format!("€{:.2}", amount),
        "GBP" => format!("£{:.2}", amount),
        _ => format!("{} {:.2}", currency, amount),
    }
}

/// Format a whole-unit top-up amount
pub fn format_amount(amount: u64, currency: &str) -> String {
    format_currency(amount as f64, currency)
}

/// Color trend by direction
pub fn color_trend(trend: Trend) -> String {
    match trend {
        Trend::Increasing => trend.as_str().red().to_string(),
        Trend::Decreasing => trend.as_str().green().to_string(),
        Trend::Stable => trend.as_str().blue().to_string(),
    }
}

/// Color confidence based on value
pub fn color_confidence(confidence: Confidence) -> String {
    match confidence {
        Confidence::High => confidence.as_str().green().to_string(),
        Confidence::Medium => confidence.as_str().yellow().to_string(),
        Confidence::Low => confidence.as_str().red().to_string(),
    }
}

/// Color urgency based on value
pub fn color_urgency(urgency: Urgency) -> String {
    match urgency {
        Urgency::Critical => urgency.as_str().red().bold().to_string(),
        Urgency::Warning => urgency.as_str().yellow().to_string(),
        Urgency::Safe => urgency.as_str().green().to_string(),
    }
}
