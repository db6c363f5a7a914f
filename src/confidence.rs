//! Confidence intervals derived from historical variance

use crate::data::{ConfidenceInterval, ForecastPoint, TimeSeriesPoint};
use crate::stats::std_dev;

/// Derives a widening-with-horizon interval around each forecast point
///
/// The margin grows linearly with forecast distance, reflecting compounding
/// uncertainty: `margin_i = z * stddev * (1 + widening * (i - 1))`.
#[derive(Debug, Clone)]
pub struct ConfidenceIntervalEstimator {
    z_score: f64,
    widening: f64,
}

impl ConfidenceIntervalEstimator {
    pub fn new(z_score: f64, widening: f64) -> Self {
        Self { z_score, widening }
    }

    /// One interval per forecast point, same ordering
    ///
    /// A zero-variance history yields zero-width intervals; lower bounds are
    /// floored at 0.
    pub fn estimate(
        &self,
        series: &[TimeSeriesPoint],
        points: &[ForecastPoint],
    ) -> Vec<ConfidenceInterval> {
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let stddev = std_dev(&values);

        points
            .iter()
            .map(|point| {
                let distance = point.period_offset.saturating_sub(1) as f64;
                let margin = self.z_score * stddev * (1.0 + self.widening * distance);
                ConfidenceInterval {
                    period_offset: point.period_offset,
                    lower: (point.value - margin).max(0.0),
                    upper: point.value + margin,
                    margin,
                }
            })
            .collect()
    }
}

impl Default for ConfidenceIntervalEstimator {
    fn default() -> Self {
        Self::new(1.96, 0.1)
    }
}

/// Re-expand intervals so each one still brackets its (possibly adjusted) point
///
/// Deterministic corrections such as promotion uplifts can push a value past
/// the band computed from historical variance alone.
pub fn realign_intervals(points: &[ForecastPoint], intervals: &mut [ConfidenceInterval]) {
    for (point, interval) in points.iter().zip(intervals.iter_mut()) {
        if point.value > interval.upper {
            interval.upper = point.value;
        }
        if point.value < interval.lower {
            interval.lower = point.value.max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ForecastMethod;

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

    fn points(values: &[f64]) -> Vec<ForecastPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ForecastPoint::new(i + 1, v, ForecastMethod::Ensemble))
            .collect()
    }

    #[test]
    fn test_margin_widens_with_horizon() {
        let estimator = ConfidenceIntervalEstimator::default();
        let intervals = estimator.estimate(
            &series(&[90.0, 110.0, 95.0, 105.0]),
            &points(&[100.0, 100.0, 100.0]),
        );

        assert_eq!(intervals.len(), 3);
        assert!(intervals[0].margin < intervals[1].margin);
        assert!(intervals[1].margin < intervals[2].margin);
        for interval in &intervals {
            assert!(interval.lower >= 0.0);
            assert!(interval.lower <= 100.0 && 100.0 <= interval.upper);
        }
    }

    #[test]
    fn test_zero_variance_history_gives_zero_width() {
        let estimator = ConfidenceIntervalEstimator::default();
        let intervals = estimator.estimate(&series(&[50.0; 12]), &points(&[50.0]));
        assert_eq!(intervals[0].margin, 0.0);
        assert_eq!(intervals[0].lower, intervals[0].upper);
    }

    #[test]
    fn test_realign_expands_to_cover_adjusted_value() {
        let estimator = ConfidenceIntervalEstimator::default();
        let forecast = points(&[100.0]);
        let mut intervals = estimator.estimate(&series(&[100.0; 6]), &forecast);

        let boosted = points(&[150.0]);
        realign_intervals(&boosted, &mut intervals);
        assert!(intervals[0].upper >= 150.0);
    }
}
