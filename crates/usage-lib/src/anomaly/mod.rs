//! Anomaly detection for daily consumption
//!
//! Flags days whose consumption lies more than a z-score threshold away
//! from the series mean, as either a spike or a drop.

mod detector;

pub use detector::{
    AnomalyDetector, AnomalyKind, AnomalyRecord, SeriesStats, DEFAULT_Z_THRESHOLD,
    MIN_SAMPLES_FOR_DETECTION,
};
