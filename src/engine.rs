//! Forecast orchestration
//!
//! Everything past the history fetch is pure and synchronous; independent
//! per-entity forecasts can run in parallel without coordination. The cache
//! is the only shared mutable resource and lives behind its own trait.

use chrono::{Months, NaiveDate, Utc};
use log::{debug, warn};

use crate::accuracy::AccuracyEvaluator;
use crate::adjustments::AdjustmentLayer;
use crate::aggregate::{aggregate_monthly, parse_period};
use crate::cache::{CacheKey, ForecastCache};
use crate::confidence::{realign_intervals, ConfidenceIntervalEstimator};
use crate::config::{ForecastConfig, ForecastRequest};
use crate::data::{
    ForecastMethod, ForecastPoint, ForecastResult, MethodSummary, TimeSeriesPoint,
};
use crate::ensemble::EnsembleCombiner;
use crate::error::{ForecastError, Result};
use crate::history::HistoryProvider;
use crate::methods::{
    Autoregressive, ExponentialSmoothing, LinearTrend, PointForecaster, SeasonalDecomposition,
    SimpleMovingAverage,
};
use crate::seasonality::SeasonalityDetector;
use crate::stats::mean;
use crate::trend::TrendAnalyzer;

/// The forecasting engine, generic over its injected collaborators
pub struct ForecastEngine<H: HistoryProvider, C: ForecastCache> {
    history: H,
    cache: C,
    config: ForecastConfig,
}

impl<H: HistoryProvider, C: ForecastCache> ForecastEngine<H, C> {
    pub fn new(history: H, cache: C, config: ForecastConfig) -> Self {
        Self {
            history,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Compute (or serve from cache) a complete forecast for the request
    pub fn generate_forecast(&self, request: &ForecastRequest) -> Result<ForecastResult> {
        if request.horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least 1".to_string(),
            ));
        }

        let key = self.cache_key(request);
        if !request.options.force_refresh {
            if let Some(hit) = self.cache.get(&key) {
                debug!("serving forecast from cache: {}", key);
                return Ok(hit);
            }
        }

        let raw = self.history.fetch_history(
            &request.tenant_id,
            &request.entity,
            self.config.lookback_months,
        )?;
        let series = aggregate_monthly(&raw, request.metric);

        if series.len() < self.config.min_history_points {
            return Err(ForecastError::InsufficientHistory {
                got: series.len(),
                min: self.config.min_history_points,
            });
        }

        let outputs = self.run_methods(&series, request.horizon);
        let method_summaries = summarize(&outputs);

        let (mut points, contributing_methods) = if request.method == ForecastMethod::Ensemble {
            EnsembleCombiner::new(self.config.weights.clone()).combine(&outputs, request.horizon)?
        } else {
            let forecast = outputs
                .iter()
                .find(|(method, _)| *method == request.method)
                .map(|(_, forecast)| forecast.clone())
                .ok_or(ForecastError::MethodUnavailable(request.method))?;
            (forecast, vec![request.method])
        };

        let estimator =
            ConfidenceIntervalEstimator::new(self.config.confidence_z, self.config.confidence_widening);
        let mut intervals = estimator.estimate(&series, &points);

        self.apply_adjustments(request, &series, &mut points)?;
        realign_intervals(&points, &mut intervals);

        let seasonality = request.options.include_seasonality.then(|| {
            SeasonalityDetector::new(
                self.config.seasonality_lag,
                self.config.seasonality_min_points,
            )
            .detect(&series)
        });
        let trend = TrendAnalyzer::new().analyze(&series);
        let accuracy =
            AccuracyEvaluator::new(self.config.holdout_points, self.config.sma_window)
                .evaluate(&series);

        let generated_at = Utc::now();
        let valid_until = generated_at
            + chrono::Duration::from_std(self.config.cache_ttl)
                .unwrap_or_else(|_| chrono::Duration::zero());

        let result = ForecastResult {
            tenant_id: request.tenant_id.clone(),
            entity: request.entity.clone(),
            horizon: request.horizon,
            method: request.method,
            metric: request.metric,
            points,
            intervals,
            accuracy,
            seasonality,
            trend,
            method_summaries,
            contributing_methods,
            generated_at,
            valid_until,
        };

        self.cache.set(key, result.clone());
        Ok(result)
    }

    fn cache_key(&self, request: &ForecastRequest) -> CacheKey {
        CacheKey {
            tenant: request.tenant_id.clone(),
            entity: request.entity.clone(),
            horizon: request.horizon,
            method: request.method,
            metric: request.metric,
            scenario: request.options.scenario.clone(),
        }
    }

    /// Run every configured method, soft-skipping any that fails
    fn run_methods(
        &self,
        series: &[TimeSeriesPoint],
        horizon: usize,
    ) -> Vec<(ForecastMethod, Vec<ForecastPoint>)> {
        let forecasters = match self.build_forecasters() {
            Ok(forecasters) => forecasters,
            Err(err) => {
                warn!("forecaster construction failed: {}", err);
                return Vec::new();
            }
        };

        let mut outputs = Vec::with_capacity(forecasters.len());
        for forecaster in &forecasters {
            match forecaster.forecast(series, horizon) {
                Ok(points) => outputs.push((forecaster.method(), points)),
                Err(err) => {
                    warn!(
                        "method {} excluded from blend: {}",
                        forecaster.method().as_str(),
                        err
                    );
                }
            }
        }
        outputs
    }

    fn build_forecasters(&self) -> Result<Vec<Box<dyn PointForecaster>>> {
        Ok(vec![
            Box::new(SimpleMovingAverage::new(self.config.sma_window)?),
            Box::new(ExponentialSmoothing::new(self.config.smoothing_alpha)?),
            Box::new(LinearTrend::new()),
            Box::new(SeasonalDecomposition::new(
                self.config.seasonal_period,
                self.config.sma_window,
            )?),
            Box::new(Autoregressive::new(self.config.ar_max_order)?),
        ])
    }

    fn apply_adjustments(
        &self,
        request: &ForecastRequest,
        series: &[TimeSeriesPoint],
        points: &mut [ForecastPoint],
    ) -> Result<()> {
        let layer = AdjustmentLayer::new();

        if request.options.include_promotion_adjustment {
            if let Some(last) = series.last() {
                if let Some((from, to)) = horizon_date_range(&last.period, request.horizon) {
                    let promotions = self.history.fetch_planned_promotions(
                        &request.tenant_id,
                        from,
                        to,
                    )?;
                    layer.apply_promotions(points, &last.period, &promotions);
                }
            }
        }

        if let Some(rate) = request.options.inflation_rate {
            layer.apply_inflation(points, rate);
        }

        Ok(())
    }
}

/// First and last calendar day covered by the forecast horizon
fn horizon_date_range(last_period: &str, horizon: usize) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = parse_period(last_period)?;
    let last_month_start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let from = last_month_start.checked_add_months(Months::new(1))?;
    let to = last_month_start
        .checked_add_months(Months::new(horizon as u32 + 1))?
        .pred_opt()?;
    Some((from, to))
}

fn summarize(outputs: &[(ForecastMethod, Vec<ForecastPoint>)]) -> Vec<MethodSummary> {
    outputs
        .iter()
        .map(|(method, forecast)| {
            let values: Vec<f64> = forecast.iter().map(|p| p.value).collect();
            let (min, max) = values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
            MethodSummary {
                method: *method,
                points_produced: values.len(),
                mean: mean(&values),
                min: if values.is_empty() { 0.0 } else { min },
                max: if values.is_empty() { 0.0 } else { max },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_date_range() {
        let (from, to) = horizon_date_range("2025-06", 6).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_horizon_date_range_rejects_garbage_period() {
        assert!(horizon_date_range("not-a-period", 3).is_none());
    }
}
