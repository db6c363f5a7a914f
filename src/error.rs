//! Error types for the promo_forecast crate

use thiserror::Error;

use crate::data::ForecastMethod;

/// Custom error types for the promo_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Fewer historical points than the configured minimum
    #[error("Insufficient history: got {got} points, need at least {min}")]
    InsufficientHistory { got: usize, min: usize },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A forecast method was handed an empty series
    #[error("Empty time series data")]
    EmptySeries,

    /// An explicitly requested method produced no forecast
    #[error("Method unavailable: {0:?} produced no forecast for this series")]
    MethodUnavailable(ForecastMethod),

    /// Error from the history collaborator
    #[error("History provider error: {0}")]
    History(String),

    /// Degenerate numeric case that escaped internal guards
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
