//! Multiplicative seasonal decomposition forecasting

use crate::data::{ForecastMethod, ForecastPoint, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use crate::methods::{flat_forecast, series_values, trailing_mean, PointForecaster};
use crate::stats::{least_squares_slope, mean};

/// Seasonal decomposition model
///
/// Computes a multiplicative seasonal index per calendar slot as the slot's
/// average value over the overall average, then forecasts
/// `(last + trend * step) * index[slot]`. A series shorter than one full
/// seasonal period carries no seasonal signal and falls back to the SMA rule.
#[derive(Debug, Clone)]
pub struct SeasonalDecomposition {
    period: usize,
    fallback_window: usize,
}

impl SeasonalDecomposition {
    /// Create a new seasonal decomposition model
    pub fn new(period: usize, fallback_window: usize) -> Result<Self> {
        if period < 2 {
            return Err(ForecastError::InvalidParameter(
                "Seasonal period must be at least 2".to_string(),
            ));
        }
        if fallback_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Fallback window must be positive".to_string(),
            ));
        }
        Ok(Self {
            period,
            fallback_window,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Seasonal index per slot: slot mean over overall mean
    fn seasonal_indices(&self, values: &[f64]) -> Option<Vec<f64>> {
        let overall = mean(values);
        if overall.abs() < 1e-12 {
            return None;
        }

        let mut sums = vec![0.0; self.period];
        let mut counts = vec![0usize; self.period];
        for (i, &v) in values.iter().enumerate() {
            let slot = i % self.period;
            sums[slot] += v;
            counts[slot] += 1;
        }

        Some(
            sums.iter()
                .zip(counts.iter())
                .map(|(&sum, &count)| {
                    if count == 0 {
                        1.0
                    } else {
                        (sum / count as f64) / overall
                    }
                })
                .collect(),
        )
    }
}

impl PointForecaster for SeasonalDecomposition {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Seasonal
    }

    fn forecast(&self, series: &[TimeSeriesPoint], horizon: usize) -> Result<Vec<ForecastPoint>> {
        let values = series_values(series)?;
        let n = values.len();

        if n < self.period {
            let average = trailing_mean(&values, self.fallback_window);
            return Ok(flat_forecast(average, horizon, self.method()));
        }

        let indices = match self.seasonal_indices(&values) {
            Some(indices) => indices,
            // all-zero history carries no scale to decompose against
            None => return Ok(flat_forecast(0.0, horizon, self.method())),
        };

        let last = values[n - 1];
        let trend = least_squares_slope(&values);

        Ok((1..=horizon)
            .map(|offset| {
                let slot = (n + offset - 1) % self.period;
                let value = (last + trend * offset as f64) * indices[slot];
                ForecastPoint::new(offset, value, self.method())
            })
            .collect())
    }
}
