//! Core data types shared across the forecasting engine

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single raw sales/spend record as fetched from history storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Date of the observation
    pub date: NaiveDate,
    /// Units sold/consumed
    pub units: f64,
    /// Revenue or spend amount
    pub revenue: f64,
}

/// Which aggregated field is forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueMetric {
    Units,
    Revenue,
}

/// One monthly bucket of aggregated history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Calendar month in "YYYY-MM" form
    pub period: String,
    /// Aggregated value for the month
    pub value: f64,
    /// Number of raw records that contributed
    pub sample_count: usize,
}

/// Forecast methods known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMethod {
    Sma,
    Exponential,
    Linear,
    Seasonal,
    Arima,
    Ensemble,
}

impl ForecastMethod {
    /// Stable lowercase name, used in cache keys and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::Sma => "sma",
            ForecastMethod::Exponential => "exponential",
            ForecastMethod::Linear => "linear",
            ForecastMethod::Seasonal => "seasonal",
            ForecastMethod::Arima => "arima",
            ForecastMethod::Ensemble => "ensemble",
        }
    }
}

/// Kind of deterministic correction applied after the statistical blend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    PromotionUplift,
    Inflation,
}

/// Record of one correction applied to a forecast point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub kind: AdjustmentKind,
    /// Multiplicative factor that was applied
    pub factor: f64,
    /// Human-readable explanation of where the correction came from
    pub reason: String,
}

/// One forecast value for a future period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 1-indexed steps beyond the last historical period
    pub period_offset: usize,
    /// Forecast value, clamped to be non-negative
    pub value: f64,
    /// Method that produced this point
    pub method: ForecastMethod,
    /// Corrections applied on top of the statistical value
    pub adjustments: Vec<Adjustment>,
}

impl ForecastPoint {
    pub fn new(period_offset: usize, value: f64, method: ForecastMethod) -> Self {
        Self {
            period_offset,
            value: value.max(0.0),
            method,
            adjustments: Vec::new(),
        }
    }
}

/// Widening-with-horizon bounds around a forecast point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub period_offset: usize,
    pub lower: f64,
    pub upper: f64,
    pub margin: f64,
}

/// Summary statistics for one method's forecast output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSummary {
    pub method: ForecastMethod,
    pub points_produced: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Confidence bucket for the seasonality diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalityConfidence {
    High,
    Medium,
    Low,
}

/// Result of the seasonality pass over the historical series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityDiagnostic {
    pub detected: bool,
    /// Lag (in months) the autocorrelation was measured at
    pub lag: usize,
    pub autocorrelation: f64,
    pub confidence: SeasonalityConfidence,
    /// Set when detection could not run, e.g. "insufficient_history"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Direction of the fitted trend line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Strength bucket for the trend diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
}

/// Result of the trend pass over the historical series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDiagnostic {
    pub direction: TrendDirection,
    /// Least-squares slope of the raw series, in value units per month
    pub slope: f64,
    pub strength: TrendStrength,
}

/// Accuracy bucket from the back-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyRating {
    High,
    Medium,
    Low,
    InsufficientData,
}

/// Back-tested accuracy of the baseline method on held-out history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyDiagnostic {
    /// Mean Absolute Percentage Error over nonzero actuals, as a percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mape: Option<f64>,
    pub rating: AccuracyRating,
    /// Size of the held-out window that was compared
    pub holdout_points: usize,
}

/// A planned future promotion known to the business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedPromotion {
    pub date: NaiveDate,
    pub name: String,
    /// Multiplicative uplift applied to the promoted period, e.g. 1.25
    pub uplift: f64,
}

/// Aggregate root packaging a complete forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub tenant_id: String,
    pub entity: String,
    pub horizon: usize,
    pub method: ForecastMethod,
    pub metric: ValueMetric,
    /// Ordered forecast, exactly `horizon` points with offsets 1..=horizon
    pub points: Vec<ForecastPoint>,
    /// One interval per forecast point, same ordering
    pub intervals: Vec<ConfidenceInterval>,
    pub accuracy: AccuracyDiagnostic,
    /// Present only when seasonality analysis was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<SeasonalityDiagnostic>,
    pub trend: TrendDiagnostic,
    pub method_summaries: Vec<MethodSummary>,
    /// Methods that actually contributed to the output
    pub contributing_methods: Vec<ForecastMethod>,
    pub generated_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}
