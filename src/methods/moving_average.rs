//! Simple moving average forecasting

use crate::data::{ForecastMethod, ForecastPoint, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use crate::methods::{flat_forecast, series_values, trailing_mean, PointForecaster};

/// Simple Moving Average model
///
/// Averages the last `window` observations (or all of them if the series is
/// shorter) and holds that constant across the horizon.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    window: usize,
}

impl SimpleMovingAverage {
    /// Create a new Simple Moving Average model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl PointForecaster for SimpleMovingAverage {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Sma
    }

    fn forecast(&self, series: &[TimeSeriesPoint], horizon: usize) -> Result<Vec<ForecastPoint>> {
        let values = series_values(series)?;
        let average = trailing_mean(&values, self.window);
        Ok(flat_forecast(average, horizon, self.method()))
    }
}
