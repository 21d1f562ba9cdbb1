//! Energy usage prediction library
//!
//! This crate provides the core functionality for:
//! - Consumption forecasting from daily usage history
//! - Weekday/weekend pattern analysis
//! - Prepaid top-up recommendations and credit runway estimates
//! - Anomaly detection
//! - Loading and validating usage series
//! - Metrics and structured logging

pub mod anomaly;
pub mod ingest;
pub mod models;
pub mod observability;
pub mod predictor;
pub mod sample;

pub use anomaly::{AnomalyDetector, AnomalyKind, AnomalyRecord, SeriesStats};
pub use ingest::{load_series, parse_series, validate_series, IngestError};
pub use models::*;
pub use observability::{PredictorMetrics, StructuredLogger};
pub use predictor::{
    ConsumptionForecast, Confidence, DominantPattern, LinearFit, PatternSummary,
    PaymentRecommendation, PeriodRecommendation, Runway, RunwayEstimate, Trend, Urgency,
    UsagePredictor, UsageSeries,
};
