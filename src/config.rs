//! Engine configuration and per-request options

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::{ForecastMethod, ValueMetric};
use crate::ensemble::MethodWeights;

/// Per-request options, every recognized flag spelled out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastOptions {
    /// Run the seasonality diagnostic and attach it to the result
    pub include_seasonality: bool,
    /// Fetch planned promotions and apply their uplifts
    pub include_promotion_adjustment: bool,
    /// Bypass the cache and recompute
    pub force_refresh: bool,
    /// Annual inflation rate for budget-forecast variants, e.g. 0.03
    pub inflation_rate: Option<f64>,
    /// Scenario label folded into the cache key
    pub scenario: Option<String>,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            include_seasonality: true,
            include_promotion_adjustment: false,
            force_refresh: false,
            inflation_rate: None,
            scenario: None,
        }
    }
}

/// One forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub tenant_id: String,
    /// Entity filter, e.g. a product group or account identifier
    pub entity: String,
    /// Number of future periods to forecast, must be >= 1
    pub horizon: usize,
    /// `Ensemble` blends every method; a specific method uses it alone
    pub method: ForecastMethod,
    pub metric: ValueMetric,
    pub options: ForecastOptions,
}

impl ForecastRequest {
    /// Ensemble forecast of units with default options
    pub fn new(tenant_id: impl Into<String>, entity: impl Into<String>, horizon: usize) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            entity: entity.into(),
            horizon,
            method: ForecastMethod::Ensemble,
            metric: ValueMetric::Units,
            options: ForecastOptions::default(),
        }
    }
}

/// Engine-wide tunables with documented defaults
///
/// Every algorithm constant lives here so tests can exercise edge cases
/// (single-method ensembles, tiny TTLs) deterministically.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    /// Months of history requested from the provider
    pub lookback_months: u32,
    /// Below this many aggregated points the request fails
    pub min_history_points: usize,
    /// SMA window
    pub sma_window: usize,
    /// Exponential smoothing factor
    pub smoothing_alpha: f64,
    /// Seasonal decomposition cycle length
    pub seasonal_period: usize,
    /// Maximum autoregressive order
    pub ar_max_order: usize,
    /// Ensemble blend weights
    pub weights: MethodWeights,
    /// Z-score for the confidence interval
    pub confidence_z: f64,
    /// Linear widening per period of forecast distance
    pub confidence_widening: f64,
    /// Held-out points for the accuracy back-test
    pub holdout_points: usize,
    /// Autocorrelation lag for seasonality detection
    pub seasonality_lag: usize,
    /// Minimum points before seasonality detection runs
    pub seasonality_min_points: usize,
    /// Cache entry lifetime
    pub cache_ttl: Duration,
    /// Size threshold that triggers a cache sweep
    pub cache_max_entries: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            lookback_months: 36,
            min_history_points: 12,
            sma_window: 3,
            smoothing_alpha: 0.3,
            seasonal_period: 12,
            ar_max_order: 3,
            weights: MethodWeights::default(),
            confidence_z: 1.96,
            confidence_widening: 0.1,
            holdout_points: 6,
            seasonality_lag: 12,
            seasonality_min_points: 24,
            cache_ttl: Duration::from_secs(30 * 60),
            cache_max_entries: 512,
        }
    }
}
