//! Write the demo series as a starter data file

use anyhow::{Context, Result};
use std::path::Path;
use usage_lib::sample::demo_series;

use crate::output::print_success;

/// Write `days` of demo history ending today to `output`, or stdout
pub fn write_sample(days: usize, rate_per_kwh: f64, output: Option<&Path>) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let records = demo_series(today, days, rate_per_kwh);
    let json = serde_json::to_string_pretty(&records)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_success(&format!(
                "Wrote {} days of sample usage to {}",
                records.len(),
                path.display()
            ));
        }
        None => println!("{}", json),
    }

    Ok(())
}
