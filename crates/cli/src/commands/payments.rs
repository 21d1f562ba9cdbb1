//! Prepaid balance commands: top-up recommendation and credit runway

use anyhow::Result;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};
use usage_lib::{PaymentRecommendation, RunwayEstimate, Urgency, UsagePredictor};

use super::Settings;
use crate::output::{
    color_confidence, color_urgency, format_amount, format_currency, print_heading, print_info,
    print_json, print_warning, OutputFormat,
};

/// Row for the per-period top-up table
#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

/// Show top-up recommendation
pub fn show_recommendation(
    predictor: &UsagePredictor,
    settings: &Settings,
    balance: f64,
) -> Result<()> {
    let recommendation =
        predictor.recommend_payment_amount_in(balance, settings.rate_per_kwh, &settings.currency);

    match settings.format {
        OutputFormat::Json => print_json(&recommendation)?,
        OutputFormat::Table => print_recommendation_table(&recommendation, settings),
    }

    Ok(())
}

pub(crate) fn print_recommendation_table(
    recommendation: &PaymentRecommendation,
    settings: &Settings,
) {
    let currency = settings.currency.as_str();

    print_heading("Top-up Recommendation");
    println!(
        "Tariff:                 {}/kWh",
        format_currency(settings.rate_per_kwh, currency)
    );
    if let Some(days) = recommendation.balance_cover_days {
        println!("Balance covers:         {:.1} days", days);
    }
    println!();

    println!(
        "{} {}",
        "Recommended:".bold(),
        format_amount(recommendation.recommended_amount, currency).green().bold()
    );
    println!(
        "Minimum (3 days):       {}",
        format_amount(recommendation.minimum_amount, currency)
    );
    println!(
        "Optimal (2 weeks):      {}",
        format_amount(recommendation.optimal_amount, currency)
    );
    println!(
        "Economical (month):     {}",
        format_amount(recommendation.economical_amount, currency)
    );
    println!();

    let rows: Vec<PeriodRow> = recommendation
        .per_period_breakdown
        .iter()
        .map(|p| PeriodRow {
            period: p.period_label(),
            amount: format_amount(p.amount, currency),
            reason: p.reason.clone(),
            confidence: p.confidence.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    if let Some(first) = recommendation.per_period_breakdown.first() {
        println!("Forecast confidence:    {}", color_confidence(first.confidence));
    }
    print_info(&recommendation.insight_message);
    println!();
}

/// Show credit runway
pub fn show_runway(predictor: &UsagePredictor, settings: &Settings, balance: f64) -> Result<()> {
    let estimate = predictor.calculate_runway(balance, settings.rate_per_kwh);

    match settings.format {
        OutputFormat::Json => print_json(&estimate)?,
        OutputFormat::Table => print_runway_table(&estimate, settings, balance),
    }

    Ok(())
}

pub(crate) fn print_runway_table(estimate: &RunwayEstimate, settings: &Settings, balance: f64) {
    print_heading("Credit Runway");
    println!(
        "Balance:                {}",
        format_currency(balance, &settings.currency)
    );

    match estimate {
        RunwayEstimate::NoDepletion => {
            print_info("No consumption predicted, the balance will not run out");
        }
        RunwayEstimate::Depletes(runway) => {
            println!(
                "Daily cost:             {}",
                format_currency(runway.daily_cost, &settings.currency)
            );
            println!("Days remaining:         {}", runway.days_remaining);
            println!(
                "Runs out on:            {}",
                runway.projected_runout_date.format("%b %-d, %Y")
            );
            println!("Urgency:                {}", color_urgency(runway.urgency));

            if runway.urgency == Urgency::Critical {
                print_warning("Top up soon to avoid losing power");
            }
        }
    }
    println!();
}
