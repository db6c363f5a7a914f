//! Shared statistics helpers for the forecast methods and diagnostics
//!
//! All helpers guard degenerate input (empty series, zero variance) and
//! return a safe default instead of NaN or infinity.

use statrs::statistics::Statistics;

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    Statistics::mean(values)
}

/// Sample standard deviation, 0.0 when fewer than two points
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sd = Statistics::std_dev(values);
    if sd.is_finite() {
        sd
    } else {
        0.0
    }
}

/// Least-squares slope of `values` against their indices
///
/// Returns 0.0 when fewer than two points are available (a flat line is the
/// safe reading of a single observation).
pub fn least_squares_slope(values: &[f64]) -> f64 {
    least_squares(values).0
}

/// Least-squares fit of `values` against their indices as `(slope, intercept)`
pub fn least_squares(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    if n < 2 {
        return (0.0, values.first().copied().unwrap_or(0.0));
    }

    let n_f = n as f64;
    let x_mean = (n_f - 1.0) / 2.0;
    let y_mean = mean(values);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    if denominator.abs() < 1e-12 {
        return (0.0, y_mean);
    }

    let slope = numerator / denominator;
    (slope, y_mean - slope * x_mean)
}

/// Autocorrelation of the series at the given lag
///
/// The overlapping covariance is normalized by the full-series variance, so
/// a perfectly periodic series scores about `(n - lag) / n` rather than 1.
/// Returns 0.0 when the series is too short for the lag or has zero variance.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if lag == 0 || n <= lag {
        return 0.0;
    }

    let m = mean(values);
    let mut numerator = 0.0;
    for i in 0..n - lag {
        numerator += (values[i] - m) * (values[i + lag] - m);
    }

    let denominator: f64 = values.iter().map(|&v| (v - m) * (v - m)).sum();
    if denominator.abs() < 1e-12 {
        return 0.0;
    }

    numerator / denominator
}
