//! Closed-form statistics used by the forecaster
//!
//! The time axis is the record index, so a series is assumed to be
//! equally spaced (one record per day).

use serde::{Deserialize, Serialize};

/// Ordinary least squares fit `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at index `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a least squares line through `values` against their indices
///
/// Returns `None` for fewer than two points, where the slope is undefined.
pub fn fit_linear_trend(values: &[f64]) -> Option<LinearFit> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();
    let denom = n * sum_x2 - sum_x.powi(2);
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(LinearFit { slope, intercept })
}

/// Arithmetic mean, `0` for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round to `places` decimal places, half away from zero
///
/// Rounds the exact binary value, so `1.45` (stored just below 1.45) rounds
/// to `1.4` even though `1.45 * 10.0` evaluates to exactly `14.5`.
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places as i32);
    let magnitude = value.abs();
    let scaled = magnitude * factor;
    // Exact remainder lost when forming `scaled`
    let residual = magnitude.mul_add(factor, -scaled);

    let floor = scaled.floor();
    let rounded = if scaled - floor == 0.5 {
        if residual < 0.0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        scaled.round()
    };
    (rounded / factor).copysign(value)
}
