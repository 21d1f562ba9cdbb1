//! Energy Usage Predictor CLI
//!
//! A command-line tool for forecasting prepaid electricity consumption,
//! sizing top-ups and spotting unusual days in a usage history.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{payments, report, sample, usage, Settings};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use usage_lib::PredictorMetrics;

/// Energy Usage Predictor CLI
#[derive(Parser)]
#[command(name = "eup")]
#[command(author, version, about = "CLI for the Energy Usage Predictor", long_about = None)]
pub struct Cli {
    /// Usage history file, a JSON array of daily records (demo data if not specified)
    #[arg(long, env = "EUP_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// Tariff in currency units per kWh (overrides config)
    #[arg(long, global = true)]
    pub rate: Option<f64>,

    /// Output format
    #[arg(long, short, default_value = "table", global = true)]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Print Prometheus metrics after the command
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast consumption from the usage trend
    Forecast {
        /// Forecast horizon in days
        #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,
    },

    /// Compare weekday and weekend consumption
    Patterns,

    /// Recommend top-up amounts
    Recommend {
        /// Current prepaid balance
        #[arg(long, short, default_value_t = 0.0)]
        balance: f64,
    },

    /// List days with unusual consumption
    Anomalies,

    /// Estimate how long the balance lasts
    Runway {
        /// Current prepaid balance
        #[arg(long, short)]
        balance: f64,
    },

    /// Show forecast, patterns, recommendation, runway and anomalies
    Report {
        /// Current prepaid balance
        #[arg(long, short, default_value_t = 0.0)]
        balance: f64,

        /// Forecast horizon in days
        #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,
    },

    /// Generate a demo usage history file
    Sample {
        /// Number of days to generate
        #[arg(long, default_value_t = commands::DEMO_DAYS)]
        days: usize,

        /// Output file path (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so JSON output on stdout stays parseable
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::CliConfig::load()?;
    init_tracing(cli.verbose, config.log_json);

    let settings = Settings {
        rate_per_kwh: cli.rate.unwrap_or(config.rate_per_kwh),
        currency: config.currency.clone(),
        horizon_days: config.horizon_days,
        format: cli.format,
    };

    // Execute command
    let load = || commands::load_predictor(cli.data.as_deref(), settings.rate_per_kwh);
    match cli.command {
        Commands::Forecast { days } => usage::show_forecast(&load()?, &settings, days)?,
        Commands::Patterns => usage::show_patterns(&load()?, &settings)?,
        Commands::Anomalies => usage::show_anomalies(&load()?, &settings)?,
        Commands::Recommend { balance } => {
            payments::show_recommendation(&load()?, &settings, balance)?;
        }
        Commands::Runway { balance } => payments::show_runway(&load()?, &settings, balance)?,
        Commands::Report { balance, days } => {
            report::show_report(&load()?, &settings, balance, days)?;
        }
        Commands::Sample { days, output } => {
            sample::write_sample(days, settings.rate_per_kwh, output.as_deref())?;
        }
    }

    if cli.metrics {
        eprintln!("{}", PredictorMetrics::new().gather_text()?);
    }

    Ok(())
}
