//! Back-tested forecast accuracy on held-out history

use crate::data::{AccuracyDiagnostic, AccuracyRating, TimeSeriesPoint};
use crate::methods::trailing_mean;

/// Back-tests the SMA baseline on the most recent history
///
/// The last `holdout` points are withheld, forecast from the preceding points
/// with the moving-average rule, and scored with MAPE over nonzero actuals.
#[derive(Debug, Clone)]
pub struct AccuracyEvaluator {
    holdout: usize,
    sma_window: usize,
}

impl AccuracyEvaluator {
    pub fn new(holdout: usize, sma_window: usize) -> Self {
        Self {
            holdout,
            sma_window,
        }
    }

    pub fn evaluate(&self, series: &[TimeSeriesPoint]) -> AccuracyDiagnostic {
        // Need at least one training point beyond the held-out window
        if series.len() <= self.holdout {
            return AccuracyDiagnostic {
                mape: None,
                rating: AccuracyRating::InsufficientData,
                holdout_points: 0,
            };
        }

        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let split = values.len() - self.holdout;
        let (train, test) = values.split_at(split);

        let baseline = trailing_mean(train, self.sma_window);

        let mut error_sum = 0.0;
        let mut valid = 0usize;
        for &actual in test {
            if actual == 0.0 {
                continue;
            }
            error_sum += ((actual - baseline).abs() / actual.abs()) * 100.0;
            valid += 1;
        }

        if valid == 0 {
            return AccuracyDiagnostic {
                mape: None,
                rating: AccuracyRating::InsufficientData,
                holdout_points: self.holdout,
            };
        }

        let mape = error_sum / valid as f64;
        let rating = if mape < 10.0 {
            AccuracyRating::High
        } else if mape < 20.0 {
            AccuracyRating::Medium
        } else {
            AccuracyRating::Low
        };

        AccuracyDiagnostic {
            mape: Some(mape),
            rating,
            holdout_points: self.holdout,
        }
    }
}

impl Default for AccuracyEvaluator {
    fn default() -> Self {
        Self::new(6, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_flat_series_scores_perfectly() {
        let diagnostic = AccuracyEvaluator::default().evaluate(&series(&[75.0; 14]));
        assert_eq!(diagnostic.mape, Some(0.0));
        assert_eq!(diagnostic.rating, AccuracyRating::High);
        assert_eq!(diagnostic.holdout_points, 6);
    }

    #[test]
    fn test_too_short_series_is_insufficient() {
        let diagnostic = AccuracyEvaluator::default().evaluate(&series(&[10.0; 6]));
        assert_eq!(diagnostic.rating, AccuracyRating::InsufficientData);
        assert_eq!(diagnostic.mape, None);
    }

    #[test]
    fn test_all_zero_holdout_is_insufficient_not_perfect() {
        let mut values = vec![10.0; 8];
        values.extend_from_slice(&[0.0; 6]);
        let diagnostic = AccuracyEvaluator::default().evaluate(&series(&values));
        assert_eq!(diagnostic.rating, AccuracyRating::InsufficientData);
    }

    #[test]
    fn test_volatile_series_rates_low() {
        // Train settles near 100, holdout jumps far away
        let mut values = vec![100.0; 8];
        values.extend_from_slice(&[200.0, 210.0, 190.0, 205.0, 195.0, 200.0]);
        let diagnostic = AccuracyEvaluator::default().evaluate(&series(&values));
        assert_eq!(diagnostic.rating, AccuracyRating::Low);
        assert!(diagnostic.mape.unwrap() > 20.0);
    }
}
