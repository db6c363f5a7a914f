//! Forecast result caching
//!
//! The cache is an injected abstraction so the store can be swapped without
//! touching forecasting logic. It is an optimization only: a missing or
//! failing cache changes latency, never correctness. Racing writers to the
//! same key are not coalesced; payloads are deterministic within a TTL
//! window, so the later write winning is harmless.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::data::{ForecastMethod, ForecastResult, ValueMetric};

/// Stable composite key for one forecast computation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub tenant: String,
    pub entity: String,
    pub horizon: usize,
    pub method: ForecastMethod,
    pub metric: ValueMetric,
    pub scenario: Option<String>,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:h{}:{}:{:?}:{}",
            self.tenant,
            self.entity,
            self.horizon,
            self.method.as_str(),
            self.metric,
            self.scenario.as_deref().unwrap_or("default"),
        )
    }
}

/// Injected cache seam for the engine
pub trait ForecastCache: Send + Sync {
    /// Return the payload if present and not expired
    fn get(&self, key: &CacheKey) -> Option<ForecastResult>;

    /// Store a freshly computed result
    fn set(&self, key: CacheKey, result: ForecastResult);

    /// Drop every expired entry
    fn evict_expired(&self);
}

struct CacheEntry {
    payload: ForecastResult,
    created_at: Instant,
}

/// Concurrency-safe in-memory cache with TTL and size-triggered sweeping
pub struct InMemoryForecastCache {
    store: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
}

impl InMemoryForecastCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            ttl,
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.store.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ForecastCache for InMemoryForecastCache {
    fn get(&self, key: &CacheKey) -> Option<ForecastResult> {
        let store = match self.store.read() {
            Ok(store) => store,
            Err(_) => {
                warn!("forecast cache lock poisoned, treating as miss");
                return None;
            }
        };

        let entry = store.get(key)?;
        if entry.created_at.elapsed() >= self.ttl {
            debug!("cache entry expired for {}", key);
            return None;
        }
        debug!("cache hit for {}", key);
        Some(entry.payload.clone())
    }

    fn set(&self, key: CacheKey, result: ForecastResult) {
        let mut store = match self.store.write() {
            Ok(store) => store,
            Err(_) => {
                warn!("forecast cache lock poisoned, dropping write");
                return;
            }
        };

        store.insert(
            key,
            CacheEntry {
                payload: result,
                created_at: Instant::now(),
            },
        );

        if store.len() > self.max_entries {
            let ttl = self.ttl;
            store.retain(|_, entry| entry.created_at.elapsed() < ttl);
        }
    }

    fn evict_expired(&self) {
        if let Ok(mut store) = self.store.write() {
            let ttl = self.ttl;
            store.retain(|_, entry| entry.created_at.elapsed() < ttl);
        }
    }
}

/// Always-miss cache for callers that want recomputation on every request
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl ForecastCache for NoopCache {
    fn get(&self, _key: &CacheKey) -> Option<ForecastResult> {
        None
    }

    fn set(&self, _key: CacheKey, _result: ForecastResult) {}

    fn evict_expired(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AccuracyDiagnostic, AccuracyRating, TrendDiagnostic, TrendDirection, TrendStrength};
    use chrono::Utc;

    fn key(tenant: &str) -> CacheKey {
        CacheKey {
            tenant: tenant.to_string(),
            entity: "all".to_string(),
            horizon: 6,
            method: ForecastMethod::Ensemble,
            metric: ValueMetric::Units,
            scenario: None,
        }
    }

    fn result(tenant: &str) -> ForecastResult {
        let now = Utc::now();
        ForecastResult {
            tenant_id: tenant.to_string(),
            entity: "all".to_string(),
            horizon: 6,
            method: ForecastMethod::Ensemble,
            metric: ValueMetric::Units,
            points: Vec::new(),
            intervals: Vec::new(),
            accuracy: AccuracyDiagnostic {
                mape: None,
                rating: AccuracyRating::InsufficientData,
                holdout_points: 0,
            },
            seasonality: None,
            trend: TrendDiagnostic {
                direction: TrendDirection::Stable,
                slope: 0.0,
                strength: TrendStrength::Weak,
            },
            method_summaries: Vec::new(),
            contributing_methods: Vec::new(),
            generated_at: now,
            valid_until: now,
        }
    }

    #[test]
    fn test_round_trip_within_ttl() {
        let cache = InMemoryForecastCache::new(Duration::from_secs(60), 100);
        cache.set(key("t1"), result("t1"));
        let hit = cache.get(&key("t1")).expect("entry should be live");
        assert_eq!(hit.tenant_id, "t1");
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache = InMemoryForecastCache::new(Duration::ZERO, 100);
        cache.set(key("t1"), result("t1"));
        assert!(cache.get(&key("t1")).is_none());
    }

    #[test]
    fn test_size_threshold_triggers_sweep_of_expired() {
        let cache = InMemoryForecastCache::new(Duration::ZERO, 2);
        cache.set(key("a"), result("a"));
        cache.set(key("b"), result("b"));
        // Third insert pushes past the threshold; everything is expired
        cache.set(key("c"), result("c"));
        assert!(cache.len() <= 1);
    }

    #[test]
    fn test_explicit_eviction() {
        let cache = InMemoryForecastCache::new(Duration::ZERO, 100);
        cache.set(key("a"), result("a"));
        cache.evict_expired();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_key_rendering_is_stable() {
        let rendered = key("acme").to_string();
        assert_eq!(rendered, "acme:all:h6:ensemble:Units:default");
    }

    #[test]
    fn test_noop_cache_always_misses() {
        let cache = NoopCache;
        cache.set(key("t1"), result("t1"));
        assert!(cache.get(&key("t1")).is_none());
    }
}
