//! Trend analysis over the historical series

use crate::data::{TimeSeriesPoint, TrendDiagnostic, TrendDirection, TrendStrength};
use crate::stats::{least_squares_slope, mean};

/// Slope magnitude below which the series counts as stable
const STABLE_BAND: f64 = 1e-9;

/// Reports trend direction and strength from the least-squares slope
///
/// Strength is the slope as a percentage of the series mean: above 5% is
/// strong, above 2% moderate, anything else weak.
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, series: &[TimeSeriesPoint]) -> TrendDiagnostic {
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let slope = least_squares_slope(&values);

        let direction = if slope > STABLE_BAND {
            TrendDirection::Increasing
        } else if slope < -STABLE_BAND {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        };

        let series_mean = mean(&values);
        let relative = if series_mean.abs() < 1e-12 {
            0.0
        } else {
            (slope / series_mean).abs() * 100.0
        };

        let strength = if relative > 5.0 {
            TrendStrength::Strong
        } else if relative > 2.0 {
            TrendStrength::Moderate
        } else {
            TrendStrength::Weak
        };

        TrendDiagnostic {
            direction,
            slope,
            strength,
        }
    }
}
