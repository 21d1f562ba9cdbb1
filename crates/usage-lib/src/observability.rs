//! Observability infrastructure for the usage predictor
//!
//! Provides:
//! - Prometheus metrics (series loads, forecasts, fallbacks, anomalies, latency)
//! - Structured logging with tracing

use prometheus::{
    register_histogram, register_int_counter, register_int_gauge, Encoder, Histogram, IntCounter,
    IntGauge, TextEncoder,
};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Histogram buckets for computation latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.000_001, 0.000_005, 0.000_01, 0.000_05, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<PredictorMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct PredictorMetricsInner {
    series_loads: IntCounter,
    records_loaded: IntGauge,
    forecasts_generated: IntCounter,
    fallback_forecasts: IntCounter,
    anomalies_detected: IntCounter,
    computation_latency_seconds: Histogram,
}

impl PredictorMetricsInner {
    fn new() -> Self {
        Self {
            series_loads: register_int_counter!(
                "usage_predictor_series_loads_total",
                "Number of times a usage series was loaded"
            )
            .expect("Failed to register series_loads"),

            records_loaded: register_int_gauge!(
                "usage_predictor_records_loaded",
                "Number of records in the currently loaded series"
            )
            .expect("Failed to register records_loaded"),

            forecasts_generated: register_int_counter!(
                "usage_predictor_forecasts_generated_total",
                "Total number of consumption forecasts generated"
            )
            .expect("Failed to register forecasts_generated"),

            fallback_forecasts: register_int_counter!(
                "usage_predictor_fallback_forecasts_total",
                "Forecasts that used the default because history was too short"
            )
            .expect("Failed to register fallback_forecasts"),

            anomalies_detected: register_int_counter!(
                "usage_predictor_anomalies_detected_total",
                "Total number of anomalous days detected"
            )
            .expect("Failed to register anomalies_detected"),

            computation_latency_seconds: register_histogram!(
                "usage_predictor_computation_latency_seconds",
                "Time spent computing predictor outputs",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register computation_latency_seconds"),
        }
    }
}

/// Predictor metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct PredictorMetrics {
    _private: (),
}

impl Default for PredictorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictorMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(PredictorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &PredictorMetricsInner {
        GLOBAL_METRICS.get_or_init(PredictorMetricsInner::new)
    }

    /// Record a series load and its size
    pub fn record_series_load(&self, records: usize) {
        self.inner().series_loads.inc();
        self.inner().records_loaded.set(records as i64);
    }

    /// Record a generated forecast
    pub fn record_forecast(&self, fallback: bool) {
        self.inner().forecasts_generated.inc();
        if fallback {
            self.inner().fallback_forecasts.inc();
        }
    }

    /// Add to the anomalies detected counter
    pub fn add_anomalies_detected(&self, count: usize) {
        self.inner().anomalies_detected.inc_by(count as u64);
    }

    /// Record a computation latency observation
    pub fn observe_computation_latency(&self, duration_secs: f64) {
        self.inner().computation_latency_seconds.observe(duration_secs);
    }

    /// Total forecasts generated so far in this process
    pub fn forecasts_generated(&self) -> u64 {
        self.inner().forecasts_generated.get()
    }

    /// Total anomalies detected so far in this process
    pub fn anomalies_detected(&self) -> u64 {
        self.inner().anomalies_detected.get()
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn gather_text(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&prometheus::gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Structured logger for predictor events
///
/// Every event carries the `source` of the loaded series (a file path,
/// a meter id, or "demo").
#[derive(Clone)]
pub struct StructuredLogger {
    source: String,
}

impl StructuredLogger {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Log a series replacement
    pub fn log_series_loaded(&self, records: usize, previous: usize) {
        info!(
            event = "series_loaded",
            source = %self.source,
            records = records,
            previous_records = previous,
            "Loaded usage history"
        );
    }

    /// Log a forecast generation event
    pub fn log_forecast(&self, daily_kwh: f64, trend: &str, confidence: &str, fallback: bool) {
        if fallback {
            warn!(
                event = "forecast_fallback",
                source = %self.source,
                daily_kwh = daily_kwh,
                "Not enough history for regression, using default forecast"
            );
        } else {
            debug!(
                event = "forecast_generated",
                source = %self.source,
                daily_kwh = daily_kwh,
                trend = %trend,
                confidence = %confidence,
                "Generated consumption forecast"
            );
        }
    }

    /// Log an anomalous day
    pub fn log_anomaly(&self, date: &str, kilowatt_hours: f64, kind: &str, z_score: f64) {
        info!(
            event = "anomaly_detected",
            source = %self.source,
            date = %date,
            kilowatt_hours = kilowatt_hours,
            kind = %kind,
            z_score = z_score,
            "Anomalous consumption detected"
        );
    }

    /// Log a runway estimate
    pub fn log_runway(&self, days_remaining: Option<u64>, urgency: &str) {
        match urgency {
            "critical" => {
                warn!(
                    event = "runway_estimated",
                    source = %self.source,
                    days_remaining = ?days_remaining,
                    urgency = %urgency,
                    "Balance is about to run out"
                );
            }
            _ => {
                debug!(
                    event = "runway_estimated",
                    source = %self.source,
                    days_remaining = ?days_remaining,
                    urgency = %urgency,
                    "Estimated credit runway"
                );
            }
        }
    }
}
