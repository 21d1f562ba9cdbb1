//! Usage prediction engine

mod forecast;
mod patterns;
mod recommendation;
mod regression;
mod runway;
mod series;

pub use forecast::{
    predict_consumption, Confidence, ConsumptionForecast, Trend, DEFAULT_HORIZON_DAYS,
    FALLBACK_DAILY_KWH, FALLBACK_WEEKLY_KWH, MIN_RECORDS_FOR_REGRESSION,
};
pub use patterns::{analyze_patterns, DominantPattern, PatternSummary};
pub use recommendation::{
    insight_message, recommend_payment_amount, PaymentRecommendation, PeriodRecommendation,
    DEFAULT_CURRENCY, DEFAULT_RATE_PER_KWH, SAFETY_BUFFER_FACTOR,
};
pub use regression::{fit_linear_trend, mean, LinearFit};
pub use runway::{calculate_runway, Runway, RunwayEstimate, Urgency};
pub use series::UsageSeries;

use crate::anomaly::AnomalyRecord;
use crate::models::UsageRecord;
use crate::observability::{PredictorMetrics, StructuredLogger};
use std::sync::RwLock;
use std::time::Instant;

/// Holds the current usage series and answers prediction queries over it
///
/// Loading swaps in a whole new snapshot; every read first takes a
/// snapshot, so concurrent readers see either the old or the new series in
/// full, never a mix.
pub struct UsagePredictor {
    series: RwLock<UsageSeries>,
    metrics: PredictorMetrics,
    logger: StructuredLogger,
}

impl Default for UsagePredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl UsagePredictor {
    /// Create an empty predictor
    pub fn new() -> Self {
        Self::with_source("default")
    }

    /// Create an empty predictor whose log events carry `source`
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            series: RwLock::new(UsageSeries::default()),
            metrics: PredictorMetrics::new(),
            logger: StructuredLogger::new(source),
        }
    }

    /// Replace the loaded series wholesale
    ///
    /// Ordering and gaps are not checked; callers supply a date-ascending
    /// series (see [`crate::ingest::validate_series`]).
    pub fn load_historical_data(&self, series: impl Into<UsageSeries>) {
        let series = series.into();
        let records = series.len();
        let previous = {
            let mut guard = self.series.write().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *guard, series)
        };
        self.metrics.record_series_load(records);
        self.logger.log_series_loaded(records, previous.len());
    }

    /// Current series snapshot
    pub fn snapshot(&self) -> UsageSeries {
        // A poisoned lock still holds a complete snapshot
        self.series
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn average_daily_consumption(&self) -> f64 {
        self.snapshot().average_daily_consumption()
    }

    /// Forecast consumption over `horizon_days` (7 by default)
    pub fn predict_consumption(&self, horizon_days: u32) -> ConsumptionForecast {
        let start = Instant::now();
        let forecast = self.snapshot().predict_consumption(horizon_days);
        self.metrics
            .observe_computation_latency(start.elapsed().as_secs_f64());
        self.metrics.record_forecast(forecast.is_fallback());
        self.logger.log_forecast(
            forecast.daily_kwh,
            forecast.trend.as_str(),
            forecast.confidence.as_str(),
            forecast.is_fallback(),
        );
        forecast
    }

    pub fn analyze_patterns(&self) -> PatternSummary {
        self.snapshot().analyze_patterns()
    }

    pub fn recommend_payment_amount(
        &self,
        current_balance: f64,
        rate_per_kwh: f64,
    ) -> PaymentRecommendation {
        self.recommend_payment_amount_in(current_balance, rate_per_kwh, DEFAULT_CURRENCY)
    }

    pub fn recommend_payment_amount_in(
        &self,
        current_balance: f64,
        rate_per_kwh: f64,
        currency: &str,
    ) -> PaymentRecommendation {
        let forecast = self.predict_consumption(DEFAULT_HORIZON_DAYS);
        recommend_payment_amount(&forecast, current_balance, rate_per_kwh, currency)
    }

    pub fn detect_anomalies(&self) -> Vec<AnomalyRecord> {
        let start = Instant::now();
        let anomalies = self.snapshot().detect_anomalies();
        self.metrics
            .observe_computation_latency(start.elapsed().as_secs_f64());
        self.metrics.add_anomalies_detected(anomalies.len());
        for anomaly in &anomalies {
            self.logger.log_anomaly(
                &anomaly.date.to_string(),
                anomaly.kilowatt_hours,
                &anomaly.kind.to_string(),
                anomaly.z_score,
            );
        }
        anomalies
    }

    /// Runway counted from today on the local clock
    pub fn calculate_runway(&self, current_balance: f64, rate_per_kwh: f64) -> RunwayEstimate {
        let today = chrono::Local::now().date_naive();
        self.calculate_runway_at(current_balance, rate_per_kwh, today)
    }

    pub fn calculate_runway_at(
        &self,
        current_balance: f64,
        rate_per_kwh: f64,
        today: chrono::NaiveDate,
    ) -> RunwayEstimate {
        let forecast = self.predict_consumption(DEFAULT_HORIZON_DAYS);
        let estimate = calculate_runway(&forecast, current_balance, rate_per_kwh, today);
        self.logger
            .log_runway(estimate.days_remaining(), estimate.urgency().as_str());
        estimate
    }

    /// Number of records currently loaded
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl From<Vec<UsageRecord>> for UsagePredictor {
    fn from(records: Vec<UsageRecord>) -> Self {
        let predictor = Self::new();
        predictor.load_historical_data(records);
        predictor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn records(values: &[f64]) -> Vec<UsageRecord> {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, kwh)| {
                UsageRecord::from_reading(start + chrono::Duration::days(i as i64), *kwh, 20.0)
            })
            .collect()
    }

    #[test]
    fn test_starts_empty() {
        let predictor = UsagePredictor::new();
        assert!(predictor.is_empty());
        assert_eq!(predictor.average_daily_consumption(), 0.0);
        assert!(predictor.predict_consumption(7).is_fallback());
        assert!(predictor.detect_anomalies().is_empty());
    }

    #[test]
    fn test_load_replaces_series() {
        let predictor = UsagePredictor::new();
        predictor.load_historical_data(records(&[10.0, 20.0, 30.0, 40.0]));
        assert_eq!(predictor.len(), 4);

        predictor.load_historical_data(records(&[7.0, 7.0]));
        assert_eq!(predictor.len(), 2);
        assert!((predictor.average_daily_consumption() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let predictor = UsagePredictor::from(records(&[1.0, 2.0, 3.0]));
        let before = predictor.snapshot();
        predictor.load_historical_data(Vec::new());

        assert_eq!(before.len(), 3);
        assert!(predictor.is_empty());
    }

    #[test]
    fn test_reads_are_idempotent() {
        let values: Vec<f64> = (0..21).map(|i| 12.0 + (i % 7) as f64 * 1.5).collect();
        let predictor = UsagePredictor::from(records(&values));
        let today = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();

        assert_eq!(predictor.predict_consumption(7), predictor.predict_consumption(7));
        assert_eq!(predictor.analyze_patterns(), predictor.analyze_patterns());
        assert_eq!(
            predictor.recommend_payment_amount(300.0, 20.0),
            predictor.recommend_payment_amount(300.0, 20.0)
        );
        assert_eq!(predictor.detect_anomalies(), predictor.detect_anomalies());
        assert_eq!(
            predictor.calculate_runway_at(300.0, 20.0, today),
            predictor.calculate_runway_at(300.0, 20.0, today)
        );
    }

    #[test]
    fn test_concurrent_reads_see_whole_series() {
        let predictor = Arc::new(UsagePredictor::new());
        let short = records(&[5.0; 3]);
        let long = records(&[9.0; 40]);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let predictor = Arc::clone(&predictor);
                let (short, long) = (short.clone(), long.clone());
                std::thread::spawn(move || {
                    for j in 0..50 {
                        if (i + j) % 2 == 0 {
                            predictor.load_historical_data(short.clone());
                        } else {
                            predictor.load_historical_data(long.clone());
                        }
                        let snapshot = predictor.snapshot();
                        let avg = snapshot.average_daily_consumption();
                        match snapshot.len() {
                            3 => assert_eq!(avg, 5.0),
                            40 => assert_eq!(avg, 9.0),
                            n => panic!("partial series of {} records", n),
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
