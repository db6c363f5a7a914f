use std::time::Duration;

use promo_forecast::cache::InMemoryForecastCache;
use promo_forecast::config::{ForecastConfig, ForecastRequest};
use promo_forecast::data::{ForecastMethod, ForecastResult};
use promo_forecast::engine::ForecastEngine;
use promo_forecast::history::SyntheticHistoryGenerator;

fn demo_engine() -> ForecastEngine<SyntheticHistoryGenerator, InMemoryForecastCache> {
    let config = ForecastConfig::default();
    let cache = InMemoryForecastCache::new(Duration::from_secs(60), config.cache_max_entries);
    ForecastEngine::new(SyntheticHistoryGenerator::default(), cache, config)
}

#[test]
fn test_result_serializes_as_a_plain_structured_record() {
    let engine = demo_engine();
    let mut request = ForecastRequest::new("demo", "all-products", 6);
    request.options.inflation_rate = Some(0.03);

    let result = engine.generate_forecast(&request).unwrap();
    let json = serde_json::to_string(&result).unwrap();

    assert!(json.contains("\"method\":\"ensemble\""));
    assert!(json.contains("\"generated_at\""));
    assert!(json.contains("\"valid_until\""));
    assert!(json.contains("\"inflation\""));

    // Exact equality relies on serde_json's float_roundtrip feature; the
    // compounded inflation factors are not short decimals
    let round_trip: ForecastResult = serde_json::from_str(&json).unwrap();
    assert_eq!(round_trip, result);
}

#[test]
fn test_full_pipeline_invariants_hold_together() {
    let engine = demo_engine();
    let result = engine
        .generate_forecast(&ForecastRequest::new("demo", "all-products", 12))
        .unwrap();

    assert_eq!(result.horizon, 12);
    assert_eq!(result.method, ForecastMethod::Ensemble);
    assert_eq!(result.points.len(), 12);
    assert_eq!(result.intervals.len(), 12);

    let mut last_offset = 0;
    for (point, interval) in result.points.iter().zip(result.intervals.iter()) {
        assert_eq!(point.period_offset, last_offset + 1);
        last_offset = point.period_offset;
        assert!(point.value >= 0.0);
        assert!(interval.lower <= point.value && point.value <= interval.upper);
    }

    // Margins widen with distance
    for pair in result.intervals.windows(2) {
        assert!(pair[1].margin >= pair[0].margin);
    }

    // Every statistical method participates on the synthetic series
    assert_eq!(result.contributing_methods.len(), 5);
    assert_eq!(result.method_summaries.len(), 5);
}
