//! # Promo Forecast
//!
//! An ensembled time-series forecasting engine for trade-promotion and
//! budget planning workloads.
//!
//! ## Features
//!
//! - Monthly aggregation of raw sales/spend records
//! - Five independent forecast methods (SMA, exponential smoothing with
//!   trend, linear regression, seasonal decomposition, autoregressive)
//! - Fixed-weight ensemble with per-period renormalization
//! - Confidence intervals that widen with forecast distance
//! - Seasonality, trend, and back-tested accuracy diagnostics
//! - Known-event adjustments (planned promotions, inflation)
//! - Injected TTL cache and history-provider seams
//!
//! ## Quick Start
//!
//! ```rust
//! use promo_forecast::cache::InMemoryForecastCache;
//! use promo_forecast::config::{ForecastConfig, ForecastRequest};
//! use promo_forecast::engine::ForecastEngine;
//! use promo_forecast::history::SyntheticHistoryGenerator;
//!
//! let config = ForecastConfig::default();
//! let cache = InMemoryForecastCache::new(config.cache_ttl, config.cache_max_entries);
//! let engine = ForecastEngine::new(SyntheticHistoryGenerator::default(), cache, config);
//!
//! let request = ForecastRequest::new("demo-tenant", "all-products", 6);
//! let result = engine.generate_forecast(&request).unwrap();
//!
//! assert_eq!(result.points.len(), 6);
//! assert!(result.points.iter().all(|p| p.value >= 0.0));
//! ```

pub mod accuracy;
pub mod adjustments;
pub mod aggregate;
pub mod cache;
pub mod confidence;
pub mod config;
pub mod data;
pub mod engine;
pub mod ensemble;
pub mod error;
pub mod history;
pub mod methods;
pub mod seasonality;
pub mod stats;
pub mod trend;

// Re-export commonly used types
pub use crate::cache::{CacheKey, ForecastCache, InMemoryForecastCache, NoopCache};
pub use crate::config::{ForecastConfig, ForecastOptions, ForecastRequest};
pub use crate::data::{
    ForecastMethod, ForecastPoint, ForecastResult, RawObservation, TimeSeriesPoint, ValueMetric,
};
pub use crate::engine::ForecastEngine;
pub use crate::ensemble::MethodWeights;
pub use crate::error::{ForecastError, Result};
pub use crate::history::{HistoryProvider, StaticHistoryProvider, SyntheticHistoryGenerator};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
