//! History providers
//!
//! The engine never decides where its history comes from: the caller injects
//! a provider. Real deployments wrap their persistence layer; tests and demo
//! environments use the in-memory or synthetic variants. Synthetic data is a
//! separate, explicitly chosen component, never a silent fallback inside the
//! forecasting path.

use chrono::{Datelike, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::data::{PlannedPromotion, RawObservation};
use crate::error::{ForecastError, Result};

/// Collaborator supplying historical records and planned future events
///
/// Implementations must return records already scoped to the tenant; the
/// engine performs no authorization.
pub trait HistoryProvider {
    /// Fetch raw observations for the entity, most recent `lookback_months`
    fn fetch_history(
        &self,
        tenant: &str,
        entity: &str,
        lookback_months: u32,
    ) -> Result<Vec<RawObservation>>;

    /// Fetch promotions planned inside the date range
    fn fetch_planned_promotions(
        &self,
        tenant: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PlannedPromotion>>;
}

/// In-memory provider over preloaded records
///
/// The concrete variant for tests and embedders that already hold their
/// history in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticHistoryProvider {
    observations: Vec<RawObservation>,
    promotions: Vec<PlannedPromotion>,
}

impl StaticHistoryProvider {
    pub fn new(observations: Vec<RawObservation>, promotions: Vec<PlannedPromotion>) -> Self {
        Self {
            observations,
            promotions,
        }
    }
}

impl HistoryProvider for StaticHistoryProvider {
    fn fetch_history(
        &self,
        _tenant: &str,
        _entity: &str,
        lookback_months: u32,
    ) -> Result<Vec<RawObservation>> {
        let cutoff = self
            .observations
            .iter()
            .map(|o| o.date)
            .max()
            .and_then(|latest| latest.checked_sub_months(Months::new(lookback_months)));

        Ok(match cutoff {
            Some(cutoff) => self
                .observations
                .iter()
                .filter(|o| o.date > cutoff)
                .cloned()
                .collect(),
            None => Vec::new(),
        })
    }

    fn fetch_planned_promotions(
        &self,
        _tenant: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PlannedPromotion>> {
        Ok(self
            .promotions
            .iter()
            .filter(|p| p.date >= from && p.date <= to)
            .cloned()
            .collect())
    }
}

/// Fabricates a plausible seasonal + trend + noise monthly series
///
/// Demo/synthetic mode only. Seeded so the same configuration always yields
/// the same series. The defaults keep the annual cycle dominant over trend
/// and noise, so three years of output registers as seasonal.
#[derive(Debug, Clone)]
pub struct SyntheticHistoryGenerator {
    /// First month of the fabricated series
    pub start: NaiveDate,
    /// Number of monthly records to fabricate
    pub months: u32,
    /// Baseline monthly units
    pub base: f64,
    /// Linear growth in units per month
    pub trend_per_month: f64,
    /// Amplitude of the annual sinusoid, in units
    pub seasonal_amplitude: f64,
    /// Standard deviation of the additive noise
    pub noise_std: f64,
    /// Revenue per unit
    pub unit_price: f64,
    /// RNG seed
    pub seed: u64,
}

impl Default for SyntheticHistoryGenerator {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid date"),
            months: 36,
            base: 1000.0,
            trend_per_month: 4.0,
            seasonal_amplitude: 250.0,
            noise_std: 40.0,
            unit_price: 4.5,
            seed: 7,
        }
    }
}

impl SyntheticHistoryGenerator {
    fn generate(&self) -> Result<Vec<RawObservation>> {
        let noise = Normal::new(0.0, self.noise_std.max(0.0)).map_err(|e| {
            ForecastError::InvalidParameter(format!("Invalid noise distribution: {}", e))
        })?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut records = Vec::with_capacity(self.months as usize);
        for i in 0..self.months {
            let date = self
                .start
                .checked_add_months(Months::new(i))
                .ok_or_else(|| {
                    ForecastError::InvalidParameter("Synthetic date range overflow".to_string())
                })?;
            let phase = (date.month0() as f64) * std::f64::consts::TAU / 12.0;
            let units = (self.base
                + self.trend_per_month * i as f64
                + self.seasonal_amplitude * phase.sin()
                + noise.sample(&mut rng))
            .max(0.0);

            records.push(RawObservation {
                date,
                units,
                revenue: units * self.unit_price,
            });
        }

        Ok(records)
    }
}

impl HistoryProvider for SyntheticHistoryGenerator {
    fn fetch_history(
        &self,
        _tenant: &str,
        _entity: &str,
        lookback_months: u32,
    ) -> Result<Vec<RawObservation>> {
        let mut records = self.generate()?;
        let keep = (lookback_months as usize).min(records.len());
        records.drain(..records.len() - keep);
        Ok(records)
    }

    fn fetch_planned_promotions(
        &self,
        _tenant: &str,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<PlannedPromotion>> {
        Ok(Vec::new())
    }
}
