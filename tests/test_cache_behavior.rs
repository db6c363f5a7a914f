use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use promo_forecast::cache::InMemoryForecastCache;
use promo_forecast::config::{ForecastConfig, ForecastRequest};
use promo_forecast::data::{PlannedPromotion, RawObservation};
use promo_forecast::engine::ForecastEngine;
use promo_forecast::error::Result;
use promo_forecast::history::{HistoryProvider, StaticHistoryProvider};

/// Provider that counts fetches so tests can observe recomputation
struct CountingProvider {
    inner: StaticHistoryProvider,
    fetches: AtomicUsize,
}

impl CountingProvider {
    fn new(observations: Vec<RawObservation>) -> Self {
        Self {
            inner: StaticHistoryProvider::new(observations, Vec::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl HistoryProvider for CountingProvider {
    fn fetch_history(
        &self,
        tenant: &str,
        entity: &str,
        lookback_months: u32,
    ) -> Result<Vec<RawObservation>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_history(tenant, entity, lookback_months)
    }

    fn fetch_planned_promotions(
        &self,
        tenant: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PlannedPromotion>> {
        self.inner.fetch_planned_promotions(tenant, from, to)
    }
}

fn flat_history(months: usize) -> Vec<RawObservation> {
    (0..months)
        .map(|i| RawObservation {
            date: NaiveDate::from_ymd_opt(2023 + (i / 12) as i32, (i % 12) as u32 + 1, 15).unwrap(),
            units: 100.0,
            revenue: 250.0,
        })
        .collect()
}

#[test]
fn test_identical_requests_within_ttl_hit_the_cache() {
    let config = ForecastConfig::default();
    let cache = InMemoryForecastCache::new(Duration::from_secs(60), 100);
    let engine = ForecastEngine::new(CountingProvider::new(flat_history(24)), cache, config);

    let request = ForecastRequest::new("t1", "all", 6);
    let first = engine.generate_forecast(&request).unwrap();
    let second = engine.generate_forecast(&request).unwrap();

    // The cached payload is byte-identical to the computed one
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(count_of(&engine), 1);
}

#[test]
fn test_expired_entry_triggers_recomputation() {
    let config = ForecastConfig::default();
    let cache = InMemoryForecastCache::new(Duration::ZERO, 100);
    let engine = ForecastEngine::new(CountingProvider::new(flat_history(24)), cache, config);

    let request = ForecastRequest::new("t1", "all", 6);
    engine.generate_forecast(&request).unwrap();
    engine.generate_forecast(&request).unwrap();
    assert_eq!(count_of(&engine), 2);
}

#[test]
fn test_force_refresh_bypasses_a_live_entry() {
    let config = ForecastConfig::default();
    let cache = InMemoryForecastCache::new(Duration::from_secs(60), 100);
    let engine = ForecastEngine::new(CountingProvider::new(flat_history(24)), cache, config);

    let request = ForecastRequest::new("t1", "all", 6);
    engine.generate_forecast(&request).unwrap();

    let mut refresh = request.clone();
    refresh.options.force_refresh = true;
    engine.generate_forecast(&refresh).unwrap();
    assert_eq!(count_of(&engine), 2);

    // The refreshed result replaced the entry and serves the next call
    engine.generate_forecast(&request).unwrap();
    assert_eq!(count_of(&engine), 2);
}

#[test]
fn test_different_keys_do_not_collide() {
    let config = ForecastConfig::default();
    let cache = InMemoryForecastCache::new(Duration::from_secs(60), 100);
    let engine = ForecastEngine::new(CountingProvider::new(flat_history(24)), cache, config);

    engine
        .generate_forecast(&ForecastRequest::new("t1", "all", 6))
        .unwrap();
    engine
        .generate_forecast(&ForecastRequest::new("t1", "all", 9))
        .unwrap();
    engine
        .generate_forecast(&ForecastRequest::new("t2", "all", 6))
        .unwrap();
    assert_eq!(count_of(&engine), 3);
}

fn count_of<C: promo_forecast::cache::ForecastCache>(
    engine: &ForecastEngine<CountingProvider, C>,
) -> usize {
    engine.history().fetch_count()
}
