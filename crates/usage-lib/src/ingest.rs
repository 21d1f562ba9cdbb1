//! Loading usage history from JSON
//!
//! The predictor itself trusts its input; this is where a series read from
//! disk or a billing export gets checked before it is handed over.

use crate::models::UsageRecord;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading or validating a usage series
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read usage data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse usage data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("record {index}: {field} must be a finite non-negative number, got {value}")]
    NegativeValue {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("record {index}: day of week {value} is outside 0-6")]
    InvalidDayOfWeek { index: usize, value: u8 },

    #[error("record {index}: month {value} is outside 1-12")]
    InvalidMonth { index: usize, value: u8 },

    #[error("record {index}: date {date} does not come after {previous}")]
    OutOfOrder {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },
}

/// Parse and validate a JSON array of usage records
pub fn parse_series(json: &str) -> Result<Vec<UsageRecord>, IngestError> {
    let records: Vec<UsageRecord> = serde_json::from_str(json)?;
    validate_series(&records)?;
    debug!(records = records.len(), "Parsed usage series");
    Ok(records)
}

/// Read, parse and validate a usage series file
pub fn load_series(path: impl AsRef<Path>) -> Result<Vec<UsageRecord>, IngestError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_series(&content)
}

/// Check value ranges and strict date ordering
pub fn validate_series(records: &[UsageRecord]) -> Result<(), IngestError> {
    let mut previous: Option<NaiveDate> = None;

    for (index, record) in records.iter().enumerate() {
        for (field, value) in [("kWh", record.kilowatt_hours), ("amount", record.amount)] {
            if !value.is_finite() || value < 0.0 {
                return Err(IngestError::NegativeValue {
                    index,
                    field,
                    value,
                });
            }
        }
        if record.day_of_week > 6 {
            return Err(IngestError::InvalidDayOfWeek {
                index,
                value: record.day_of_week,
            });
        }
        if !(1..=12).contains(&record.month) {
            return Err(IngestError::InvalidMonth {
                index,
                value: record.month,
            });
        }
        if let Some(previous) = previous {
            if record.date <= previous {
                return Err(IngestError::OutOfOrder {
                    index,
                    date: record.date,
                    previous,
                });
            }
        }
        previous = Some(record.date);
    }

    Ok(())
}
