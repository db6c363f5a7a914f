//! Fixed-weight blending of the per-method forecasts

use serde::{Deserialize, Serialize};

use crate::data::{ForecastMethod, ForecastPoint};
use crate::error::{ForecastError, Result};

/// Blend weight per forecast method
///
/// Weights need not sum to 1: the combiner renormalizes over the methods
/// actually present for each period, so a missing method never biases the
/// blend toward zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodWeights {
    pub sma: f64,
    pub exponential: f64,
    pub linear: f64,
    pub seasonal: f64,
    pub arima: f64,
}

impl Default for MethodWeights {
    fn default() -> Self {
        Self {
            sma: 0.15,
            exponential: 0.25,
            linear: 0.20,
            seasonal: 0.25,
            arima: 0.15,
        }
    }
}

impl MethodWeights {
    /// Weight assigned to a method; the ensemble itself carries no weight
    pub fn weight_for(&self, method: ForecastMethod) -> f64 {
        match method {
            ForecastMethod::Sma => self.sma,
            ForecastMethod::Exponential => self.exponential,
            ForecastMethod::Linear => self.linear,
            ForecastMethod::Seasonal => self.seasonal,
            ForecastMethod::Arima => self.arima,
            ForecastMethod::Ensemble => 0.0,
        }
    }

    /// A single-method "ensemble", useful for deterministic tests
    pub fn only(method: ForecastMethod) -> Self {
        let mut weights = Self {
            sma: 0.0,
            exponential: 0.0,
            linear: 0.0,
            seasonal: 0.0,
            arima: 0.0,
        };
        match method {
            ForecastMethod::Sma => weights.sma = 1.0,
            ForecastMethod::Exponential => weights.exponential = 1.0,
            ForecastMethod::Linear => weights.linear = 1.0,
            ForecastMethod::Seasonal => weights.seasonal = 1.0,
            ForecastMethod::Arima => weights.arima = 1.0,
            ForecastMethod::Ensemble => {}
        }
        weights
    }
}

/// Combines per-method forecasts into a single weighted blend
#[derive(Debug, Clone)]
pub struct EnsembleCombiner {
    weights: MethodWeights,
}

impl EnsembleCombiner {
    pub fn new(weights: MethodWeights) -> Self {
        Self { weights }
    }

    /// Blend the available method outputs period by period
    ///
    /// Methods that produced fewer points than `horizon` (or none) are simply
    /// excluded from the affected periods; the remaining weights are
    /// renormalized. Returns the blended points plus the methods that
    /// contributed anywhere.
    pub fn combine(
        &self,
        outputs: &[(ForecastMethod, Vec<ForecastPoint>)],
        horizon: usize,
    ) -> Result<(Vec<ForecastPoint>, Vec<ForecastMethod>)> {
        let mut points = Vec::with_capacity(horizon);

        for offset in 1..=horizon {
            let mut weighted_sum = 0.0;
            let mut weight_total = 0.0;
            for (method, forecast) in outputs {
                let weight = self.weights.weight_for(*method);
                if weight <= 0.0 {
                    continue;
                }
                if let Some(point) = forecast.get(offset - 1) {
                    weighted_sum += weight * point.value;
                    weight_total += weight;
                }
            }

            if weight_total <= 0.0 {
                return Err(ForecastError::Computation(format!(
                    "No method produced a forecast for period offset {}",
                    offset
                )));
            }

            points.push(ForecastPoint::new(
                offset,
                weighted_sum / weight_total,
                ForecastMethod::Ensemble,
            ));
        }

        let contributing = outputs
            .iter()
            .filter(|(method, forecast)| {
                !forecast.is_empty() && self.weights.weight_for(*method) > 0.0
            })
            .map(|(method, _)| *method)
            .collect();

        Ok((points, contributing))
    }
}
