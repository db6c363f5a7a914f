//! Linear trend forecasting via ordinary least squares

use crate::data::{ForecastMethod, ForecastPoint, TimeSeriesPoint};
use crate::error::Result;
use crate::methods::{series_values, PointForecaster};
use crate::stats::least_squares;

/// Ordinary least squares of value against period index
///
/// The forecast is the fitted line evaluated at the future indices. A
/// single-point series has no x-variance and degrades to a flat forecast.
#[derive(Debug, Clone, Default)]
pub struct LinearTrend;

impl LinearTrend {
    pub fn new() -> Self {
        Self
    }
}

impl PointForecaster for LinearTrend {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Linear
    }

    fn forecast(&self, series: &[TimeSeriesPoint], horizon: usize) -> Result<Vec<ForecastPoint>> {
        let values = series_values(series)?;
        let (slope, intercept) = least_squares(&values);
        let n = values.len();

        Ok((1..=horizon)
            .map(|offset| {
                let x = (n - 1 + offset) as f64;
                ForecastPoint::new(offset, slope * x + intercept, self.method())
            })
            .collect())
    }
}
