//! Monthly aggregation of raw observations into an ordered time series

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::data::{RawObservation, TimeSeriesPoint, ValueMetric};

/// Group raw observations into ascending monthly buckets
///
/// Sums the selected metric per calendar month and counts contributing
/// records. Never rejects input: an empty collection yields an empty series.
/// Missing months are tolerated, not zero-filled; minimum-span enforcement
/// belongs to the caller.
pub fn aggregate_monthly(
    observations: &[RawObservation],
    metric: ValueMetric,
) -> Vec<TimeSeriesPoint> {
    let mut buckets: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();

    for obs in observations {
        let key = (obs.date.year(), obs.date.month());
        let value = match metric {
            ValueMetric::Units => obs.units,
            ValueMetric::Revenue => obs.revenue,
        };
        let entry = buckets.entry(key).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), (value, sample_count))| TimeSeriesPoint {
            period: format_period(year, month),
            value,
            sample_count,
        })
        .collect()
}

/// Render a (year, month) pair as the canonical "YYYY-MM" period string
pub fn format_period(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// Parse a "YYYY-MM" period string back into (year, month)
pub fn parse_period(period: &str) -> Option<(i32, u32)> {
    let (year, month) = period.split_once('-')?;
    let year = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if (1..=12).contains(&month) {
        Some((year, month))
    } else {
        None
    }
}

/// Number of whole months from `from` to `to`, negative when `to` is earlier
pub fn months_between(from: (i32, u32), to: (i32, u32)) -> i64 {
    (to.0 as i64 - from.0 as i64) * 12 + (to.1 as i64 - from.1 as i64)
}
