//! Z-score anomaly detection over a whole series

use crate::models::UsageRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of standard deviations that counts as anomalous
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

/// Minimum records required for anomaly detection
pub const MIN_SAMPLES_FOR_DETECTION: usize = 7;

/// Detects spikes and drops exceeding a standard deviation threshold
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    /// Number of standard deviations to consider anomalous
    pub z_threshold: f64,
    /// Series shorter than this yield no anomalies
    pub min_samples: usize,
}

impl AnomalyDetector {
    /// Create a new detector with given threshold
    pub fn new(z_threshold: f64) -> Self {
        Self {
            z_threshold,
            min_samples: MIN_SAMPLES_FOR_DETECTION,
        }
    }

    /// Set custom minimum sample count
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Find every record whose |z-score| exceeds the threshold
    ///
    /// Statistics are computed over the full series, so each record is
    /// compared against a baseline that includes itself.
    pub fn detect(&self, records: &[UsageRecord]) -> Vec<AnomalyRecord> {
        if records.len() < self.min_samples {
            return Vec::new();
        }

        let values: Vec<f64> = records.iter().map(|r| r.kilowatt_hours).collect();
        let stats = SeriesStats::from_values(&values);

        records
            .iter()
            .filter_map(|record| {
                let z_score = stats.z_score(record.kilowatt_hours)?;
                if z_score.abs() <= self.z_threshold {
                    return None;
                }
                Some(AnomalyRecord {
                    date: record.date,
                    kilowatt_hours: record.kilowatt_hours,
                    percent_deviation_from_mean: stats.percent_deviation(record.kilowatt_hours),
                    kind: if record.kilowatt_hours > stats.mean {
                        AnomalyKind::Spike
                    } else {
                        AnomalyKind::Drop
                    },
                    z_score,
                })
            })
            .collect()
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(DEFAULT_Z_THRESHOLD)
    }
}

/// Population mean and standard deviation of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

impl SeriesStats {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                count,
            };
        }

        let mean = values.iter().sum::<f64>() / count as f64;
        // Population variance: the series is the whole history, not a sample
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Self {
            mean,
            std_dev: variance.sqrt(),
            count,
        }
    }

    /// Standard deviations `value` lies from the mean; `None` for a
    /// constant series
    pub fn z_score(&self, value: f64) -> Option<f64> {
        if self.std_dev < f64::EPSILON {
            return None;
        }
        Some((value - self.mean) / self.std_dev)
    }

    /// Signed deviation from the mean as a percentage of the mean
    pub fn percent_deviation(&self, value: f64) -> f64 {
        if self.mean.abs() < f64::EPSILON {
            return 0.0;
        }
        (value - self.mean) / self.mean * 100.0
    }
}

/// Direction of an anomalous reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Spike,
    Drop,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyKind::Spike => f.write_str("spike"),
            AnomalyKind::Drop => f.write_str("drop"),
        }
    }
}

/// A day whose consumption deviates strongly from the series mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyRecord {
    pub date: NaiveDate,
    #[serde(rename = "kWh")]
    pub kilowatt_hours: f64,
    pub percent_deviation_from_mean: f64,
    pub kind: AnomalyKind,
    pub z_score: f64,
}
