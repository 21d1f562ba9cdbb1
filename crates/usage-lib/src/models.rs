//! Core data models for the usage predictor

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of metered consumption
///
/// Field names on the wire follow the billing export format
/// (`date`, `kWh`, `amount`, `dayOfWeek`, `month`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Calendar day the reading covers
    pub date: NaiveDate,
    /// Energy consumed that day
    #[serde(rename = "kWh")]
    pub kilowatt_hours: f64,
    /// Cost of the day's consumption in currency units
    pub amount: f64,
    /// Day of week, 0 = Sunday through 6 = Saturday
    pub day_of_week: u8,
    /// Month of year, 1-12
    pub month: u8,
}

impl UsageRecord {
    /// Build a record from a daily meter reading, deriving the cost,
    /// day of week and month.
    pub fn from_reading(date: NaiveDate, kilowatt_hours: f64, rate_per_kwh: f64) -> Self {
        Self {
            date,
            kilowatt_hours,
            amount: kilowatt_hours * rate_per_kwh,
            day_of_week: date.weekday().num_days_from_sunday() as u8,
            month: date.month() as u8,
        }
    }

    /// Monday through Friday
    pub fn is_weekday(&self) -> bool {
        (1..=5).contains(&self.day_of_week)
    }

    /// Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        self.day_of_week == 0 || self.day_of_week == 6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reading_derives_calendar_fields() {
        // 2024-03-03 was a Sunday
        let date = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let record = UsageRecord::from_reading(date, 12.5, 20.0);

        assert_eq!(record.day_of_week, 0);
        assert_eq!(record.month, 3);
        assert!((record.amount - 250.0).abs() < f64::EPSILON);
        assert!(record.is_weekend());
        assert!(!record.is_weekday());
    }

    #[test]
    fn test_weekday_classification() {
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        assert!(UsageRecord::from_reading(monday, 1.0, 1.0).is_weekday());
        assert!(UsageRecord::from_reading(saturday, 1.0, 1.0).is_weekend());
    }

    #[test]
    fn test_serde_field_names() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let record = UsageRecord::from_reading(date, 18.0, 20.0);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["date"], "2024-01-15");
        assert_eq!(json["kWh"], 18.0);
        assert_eq!(json["dayOfWeek"], 1);
        assert_eq!(json["month"], 1);
    }
}
