//! Lightweight autoregressive forecasting
//!
//! Coefficients come from damped autocorrelations rather than a Yule-Walker
//! solve. This is a deliberate approximation: the workload is short, noisy
//! monthly series where a full AR fit buys little, and downstream accuracy
//! expectations are calibrated against this heuristic's output.

use crate::data::{ForecastMethod, ForecastPoint, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use crate::methods::{flat_forecast, series_values, PointForecaster};
use crate::stats::autocorrelation;

/// Damping applied to each lag's autocorrelation before normalization
const COEFFICIENT_DAMPING: f64 = 0.8;

/// Autoregressive model of order `min(max_order, n - 1)`
#[derive(Debug, Clone)]
pub struct Autoregressive {
    max_order: usize,
}

impl Autoregressive {
    /// Create a new autoregressive model
    pub fn new(max_order: usize) -> Result<Self> {
        if max_order == 0 {
            return Err(ForecastError::InvalidParameter(
                "AR order must be positive".to_string(),
            ));
        }
        Ok(Self { max_order })
    }

    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Damped, non-negative autocorrelation coefficients normalized to sum 1
    ///
    /// Returns None when no lag shows positive correlation; the caller falls
    /// back to a flat forecast.
    fn coefficients(&self, values: &[f64], order: usize) -> Option<Vec<f64>> {
        let damped: Vec<f64> = (1..=order)
            .map(|lag| (autocorrelation(values, lag) * COEFFICIENT_DAMPING).max(0.0))
            .collect();

        let total: f64 = damped.iter().sum();
        if total < 1e-9 {
            return None;
        }
        Some(damped.iter().map(|c| c / total).collect())
    }
}

impl PointForecaster for Autoregressive {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Arima
    }

    fn forecast(&self, series: &[TimeSeriesPoint], horizon: usize) -> Result<Vec<ForecastPoint>> {
        let values = series_values(series)?;
        let n = values.len();

        if n < 2 {
            return Ok(flat_forecast(values[n - 1], horizon, self.method()));
        }

        let order = self.max_order.min(n - 1);
        let coefficients = match self.coefficients(&values, order) {
            Some(c) => c,
            None => return Ok(flat_forecast(values[n - 1], horizon, self.method())),
        };

        // Fold prior (actual, then forecast) values through the coefficients
        let mut history = values[n - order..].to_vec();
        let mut points = Vec::with_capacity(horizon);
        for offset in 1..=horizon {
            let mut next = 0.0;
            for (lag, &coefficient) in coefficients.iter().enumerate() {
                next += coefficient * history[history.len() - 1 - lag];
            }
            history.push(next);
            points.push(ForecastPoint::new(offset, next, self.method()));
        }

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TimeSeriesPoint;

    fn series(values: &[f64]) -> Vec<TimeSeriesPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesPoint {
                period: format!("p{}", i),
                value: v,
                sample_count: 1,
            })
            .collect()
    }

    #[test]
    fn test_forecast_stays_within_recent_range() {
        let values: Vec<f64> = (0..24).map(|i| 100.0 + (i as f64) * 2.0).collect();
        let model = Autoregressive::new(3).unwrap();
        let points = model.forecast(&series(&values), 6).unwrap();

        assert_eq!(points.len(), 6);
        // Normalized coefficients make each step a weighted average of recent
        // values, so the forecast cannot escape the trailing window's range.
        for p in &points {
            assert!(p.value >= 100.0 && p.value <= 146.0 + 1e-9);
        }
    }

    #[test]
    fn test_single_point_degrades_to_flat() {
        let model = Autoregressive::new(3).unwrap();
        let points = model.forecast(&series(&[50.0]), 4).unwrap();
        assert!(points.iter().all(|p| (p.value - 50.0).abs() < 1e-10));
    }

    #[test]
    fn test_uncorrelated_flip_flop_degrades_to_flat() {
        // Perfect alternation has negative lag-1 autocorrelation; with all
        // damped coefficients clamped to zero the model falls back to the
        // last observed value.
        let model = Autoregressive::new(1).unwrap();
        let points = model.forecast(&series(&[10.0, 20.0, 10.0, 20.0, 10.0, 20.0]), 2).unwrap();
        assert!(points.iter().all(|p| (p.value - 20.0).abs() < 1e-10));
    }

    #[test]
    fn test_order_is_capped_by_series_length() {
        let model = Autoregressive::new(3).unwrap();
        // n = 2 caps the order at 1; must not panic or error
        let points = model.forecast(&series(&[10.0, 12.0]), 3).unwrap();
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.value >= 0.0));
    }

    #[test]
    fn test_rejects_zero_order() {
        assert!(Autoregressive::new(0).is_err());
    }
}
