//! Seasonality detection over the historical series

use crate::data::{SeasonalityConfidence, SeasonalityDiagnostic, TimeSeriesPoint};
use crate::stats::autocorrelation;

/// Detects an annual cycle via autocorrelation at a fixed lag
#[derive(Debug, Clone)]
pub struct SeasonalityDetector {
    lag: usize,
    min_points: usize,
}

impl SeasonalityDetector {
    pub fn new(lag: usize, min_points: usize) -> Self {
        Self { lag, min_points }
    }

    /// Analyze the series; two full cycles of history are required
    pub fn detect(&self, series: &[TimeSeriesPoint]) -> SeasonalityDiagnostic {
        if series.len() < self.min_points {
            return SeasonalityDiagnostic {
                detected: false,
                lag: self.lag,
                autocorrelation: 0.0,
                confidence: SeasonalityConfidence::Low,
                reason: Some("insufficient_history".to_string()),
            };
        }

        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let correlation = autocorrelation(&values, self.lag);

        let confidence = if correlation > 0.5 {
            SeasonalityConfidence::High
        } else if correlation > 0.3 {
            SeasonalityConfidence::Medium
        } else {
            SeasonalityConfidence::Low
        };

        SeasonalityDiagnostic {
            detected: correlation > 0.3,
            lag: self.lag,
            autocorrelation: correlation,
            confidence,
            reason: None,
        }
    }
}

impl Default for SeasonalityDetector {
    fn default() -> Self {
        Self::new(12, 24)
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
    fn test_short_series_never_detected() {
        let detector = SeasonalityDetector::default();
        let diagnostic = detector.detect(&series(&vec![100.0; 23]));
        assert!(!diagnostic.detected);
        assert_eq!(diagnostic.reason.as_deref(), Some("insufficient_history"));
    }

    #[test]
    fn test_annual_sinusoid_detected_with_high_confidence() {
        let values: Vec<f64> = (0..36)
            .map(|i| 100.0 + 30.0 * (i as f64 * std::f64::consts::TAU / 12.0).sin())
            .collect();
        let detector = SeasonalityDetector::default();
        let diagnostic = detector.detect(&series(&values));
        assert!(diagnostic.detected);
        assert_eq!(diagnostic.confidence, SeasonalityConfidence::High);
        assert!(diagnostic.autocorrelation > 0.5);
    }

    #[test]
    fn test_flat_series_not_detected() {
        let detector = SeasonalityDetector::default();
        let diagnostic = detector.detect(&series(&vec![100.0; 30]));
        assert!(!diagnostic.detected);
        assert!(diagnostic.reason.is_none());
    }
}
