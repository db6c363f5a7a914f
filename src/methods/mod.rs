//! Point-forecast generators
//!
//! Each method is an independent, pure estimator over the aggregated monthly
//! series. Methods never fail for a series of length >= 1; degenerate numeric
//! cases degrade to a flat forecast instead of propagating NaN or infinity.

use crate::data::{ForecastMethod, ForecastPoint, TimeSeriesPoint};
use crate::error::{ForecastError, Result};

pub mod autoregressive;
pub mod exponential_smoothing;
pub mod linear_regression;
pub mod moving_average;
pub mod seasonal;

pub use autoregressive::Autoregressive;
pub use exponential_smoothing::ExponentialSmoothing;
pub use linear_regression::LinearTrend;
pub use moving_average::SimpleMovingAverage;
pub use seasonal::SeasonalDecomposition;

/// A single point-forecast generator
pub trait PointForecaster {
    /// Which method this generator implements
    fn method(&self) -> ForecastMethod;

    /// Forecast `horizon` periods past the end of `series`
    ///
    /// Returns one point per future period with offsets 1..=horizon, every
    /// value clamped to be non-negative. The only error condition is an
    /// empty input series.
    fn forecast(&self, series: &[TimeSeriesPoint], horizon: usize) -> Result<Vec<ForecastPoint>>;
}

/// Extract the value column, erroring on an empty series
pub(crate) fn series_values(series: &[TimeSeriesPoint]) -> Result<Vec<f64>> {
    if series.is_empty() {
        return Err(ForecastError::EmptySeries);
    }
    Ok(series.iter().map(|p| p.value).collect())
}

/// Build a constant forecast, the shared degenerate-case fallback
pub(crate) fn flat_forecast(
    value: f64,
    horizon: usize,
    method: ForecastMethod,
) -> Vec<ForecastPoint> {
    (1..=horizon)
        .map(|offset| ForecastPoint::new(offset, value, method))
        .collect()
}

/// Mean of the last `window` values (or all of them if shorter)
///
/// This is the SMA forecasting rule; it is shared because seasonal
/// decomposition and the accuracy back-test both fall back to it.
pub(crate) fn trailing_mean(values: &[f64], window: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let start = values.len().saturating_sub(window.max(1));
    let tail = &values[start..];
    tail.iter().sum::<f64>() / tail.len() as f64
}
