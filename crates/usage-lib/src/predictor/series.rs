//! Immutable snapshot of a loaded usage series

use super::forecast::{predict_consumption, ConsumptionForecast, DEFAULT_HORIZON_DAYS};
use super::patterns::{analyze_patterns, PatternSummary};
use super::recommendation::{recommend_payment_amount, PaymentRecommendation, DEFAULT_CURRENCY};
use super::regression::mean;
use super::runway::{calculate_runway, RunwayEstimate};
use crate::anomaly::{AnomalyDetector, AnomalyRecord};
use crate::models::UsageRecord;
use chrono::NaiveDate;
use std::sync::Arc;

/// A date-ascending series of daily usage records
///
/// Cloning is cheap (shared `Arc`), and every read is a pure function of
/// the records, so a snapshot can be handed to several consumers at once.
#[derive(Debug, Clone)]
pub struct UsageSeries {
    records: Arc<[UsageRecord]>,
}

impl UsageSeries {
    pub fn new(records: Vec<UsageRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean daily consumption, `0` for an empty series
    pub fn average_daily_consumption(&self) -> f64 {
        let values: Vec<f64> = self.records.iter().map(|r| r.kilowatt_hours).collect();
        mean(&values)
    }

    pub fn predict_consumption(&self, horizon_days: u32) -> ConsumptionForecast {
        predict_consumption(&self.records, horizon_days)
    }

    pub fn analyze_patterns(&self) -> PatternSummary {
        analyze_patterns(&self.records)
    }

    /// Top-up recommendation priced in the default currency
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
        AnomalyDetector::default().detect(&self.records)
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
        today: NaiveDate,
    ) -> RunwayEstimate {
        let forecast = self.predict_consumption(DEFAULT_HORIZON_DAYS);
        calculate_runway(&forecast, current_balance, rate_per_kwh, today)
    }
}

impl Default for UsageSeries {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<UsageRecord>> for UsageSeries {
    fn from(records: Vec<UsageRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> UsageSeries {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, kwh)| {
                UsageRecord::from_reading(start + chrono::Duration::days(i as i64), *kwh, 20.0)
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_average_daily_consumption() {
        assert_eq!(UsageSeries::default().average_daily_consumption(), 0.0);
        assert!((series(&[10.0, 20.0, 30.0]).average_daily_consumption() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_clone_shares_records() {
        let a = series(&[1.0, 2.0]);
        let b = a.clone();
        assert!(std::ptr::eq(a.records(), b.records()));
    }

    #[test]
    fn test_runway_uses_default_forecast() {
        let s = series(&[5.0; 10]);
        let today = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        let estimate = s.calculate_runway_at(100.0, 20.0, today);
        assert_eq!(estimate.days_remaining(), Some(1));
    }

    #[test]
    fn test_recommendation_from_fallback_forecast() {
        let rec = UsageSeries::default().recommend_payment_amount(0.0, 20.0);
        // fallback weekly 129.5 kWh at 20/kWh = 2590
        assert_eq!(rec.per_period_breakdown[0].amount, 2590);
        assert_eq!(rec.optimal_amount, 5180);
        assert!(rec.insight_message.starts_with("Your usage is stable at 18.50 kWh/day"));
    }
}
