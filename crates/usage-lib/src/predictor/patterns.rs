//! Weekday versus weekend consumption comparison

use super::regression::{mean, round_to};
use crate::models::UsageRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which part of the week uses more energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DominantPattern {
    #[serde(rename = "Higher on weekdays")]
    Weekdays,
    #[serde(rename = "Higher on weekends")]
    Weekends,
}

impl DominantPattern {
    pub fn label(&self) -> &'static str {
        match self {
            DominantPattern::Weekdays => "Higher on weekdays",
            DominantPattern::Weekends => "Higher on weekends",
        }
    }
}

impl fmt::Display for DominantPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Average consumption split by weekday and weekend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSummary {
    #[serde(rename = "weekdayAvgKWh")]
    pub weekday_avg_kwh: f64,
    #[serde(rename = "weekendAvgKWh")]
    pub weekend_avg_kwh: f64,
    /// Absolute weekday/weekend gap as a percentage of the weekend
    /// average, one decimal place
    pub percent_difference: f64,
    pub dominant_pattern: DominantPattern,
}

/// Compare weekday (Mon-Fri) and weekend (Sat, Sun) averages
pub fn analyze_patterns(records: &[UsageRecord]) -> PatternSummary {
    let weekday: Vec<f64> = records
        .iter()
        .filter(|r| r.is_weekday())
        .map(|r| r.kilowatt_hours)
        .collect();
    let weekend: Vec<f64> = records
        .iter()
        .filter(|r| r.is_weekend())
        .map(|r| r.kilowatt_hours)
        .collect();

    let weekday_avg = mean(&weekday);
    let weekend_avg = mean(&weekend);

    // No weekend baseline to compare against
    let percent_difference = if weekend_avg == 0.0 {
        0.0
    } else {
        round_to(((weekday_avg - weekend_avg) / weekend_avg * 100.0).abs(), 1)
    };

    let dominant_pattern = if weekday_avg > weekend_avg {
        DominantPattern::Weekdays
    } else {
        DominantPattern::Weekends
    };

    PatternSummary {
        weekday_avg_kwh: weekday_avg,
        weekend_avg_kwh: weekend_avg,
        percent_difference,
        dominant_pattern,
    }
}
