//! Built-in demo series
//!
//! Deterministic daily history with a gentle upward trend, heavier
//! weekends, a little day-to-day jitter and one injected spike.

use crate::models::UsageRecord;
use chrono::{Datelike, Days, NaiveDate, Weekday};

const BASE_KWH: f64 = 16.0;
const DAILY_GROWTH_KWH: f64 = 0.05;
const WEEKEND_EXTRA_KWH: f64 = 3.0;
const SPIKE_KWH: f64 = 45.0;

/// Days before the end of the series where the spike is placed
const SPIKE_OFFSET: usize = 4;

/// Generate `days` records ending on `end` (inclusive)
pub fn demo_series(end: NaiveDate, days: usize, rate_per_kwh: f64) -> Vec<UsageRecord> {
    (0..days)
        .filter_map(|i| {
            let back = (days - 1 - i) as u64;
            let date = end.checked_sub_days(Days::new(back))?;
            Some(UsageRecord::from_reading(date, demo_kwh(i, days, date), rate_per_kwh))
        })
        .collect()
}

fn demo_kwh(index: usize, days: usize, date: NaiveDate) -> f64 {
    if days >= 7 && index + 1 + SPIKE_OFFSET == days {
        return SPIKE_KWH;
    }
    let jitter = ((index * 7) % 5) as f64 * 0.3;
    let weekend = match date.weekday() {
        Weekday::Sat | Weekday::Sun => WEEKEND_EXTRA_KWH,
        _ => 0.0,
    };
    BASE_KWH + DAILY_GROWTH_KWH * index as f64 + weekend + jitter
}
