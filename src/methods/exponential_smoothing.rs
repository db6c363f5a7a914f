//! Exponential smoothing with linear trend extrapolation

use crate::data::{ForecastMethod, ForecastPoint, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use crate::methods::{series_values, PointForecaster};
use crate::stats::least_squares_slope;

/// Exponential smoothing model with trend
///
/// Smooths the series recursively (`s_i = alpha * v_i + (1 - alpha) * s_prev`,
/// seeded with the first observation), then extrapolates the final level
/// forward along the least-squares slope of the raw series.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
}

impl ExponentialSmoothing {
    /// Create a new exponential smoothing model
    pub fn new(alpha: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn smoothed_level(&self, values: &[f64]) -> f64 {
        let mut level = values[0];
        for &value in &values[1..] {
            level = self.alpha * value + (1.0 - self.alpha) * level;
        }
        level
    }
}

impl PointForecaster for ExponentialSmoothing {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Exponential
    }

    fn forecast(&self, series: &[TimeSeriesPoint], horizon: usize) -> Result<Vec<ForecastPoint>> {
        let values = series_values(series)?;
        let level = self.smoothed_level(&values);
        let trend = least_squares_slope(&values);

        Ok((1..=horizon)
            .map(|offset| {
                ForecastPoint::new(offset, level + trend * offset as f64, self.method())
            })
            .collect())
    }
}
