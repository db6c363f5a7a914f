//! Deterministic corrections from known future events
//!
//! This layer is the seam where forward-looking known information (planned
//! promotions, inflation assumptions) enters the forecast, kept separate from
//! the statistical methods so those stay testable in isolation.

use chrono::Datelike;

use crate::aggregate::{months_between, parse_period};
use crate::data::{Adjustment, AdjustmentKind, ForecastPoint, PlannedPromotion};

/// Applies known-event corrections to the combined forecast
#[derive(Debug, Clone, Default)]
pub struct AdjustmentLayer;

impl AdjustmentLayer {
    pub fn new() -> Self {
        Self
    }

    /// Apply planned promotions falling inside the forecast horizon
    ///
    /// Each promotion maps to the month offset past `last_period`; offsets
    /// within 1..=horizon multiply that period's value by the uplift and
    /// append one adjustment record naming the promotion.
    pub fn apply_promotions(
        &self,
        points: &mut [ForecastPoint],
        last_period: &str,
        promotions: &[PlannedPromotion],
    ) {
        let last = match parse_period(last_period) {
            Some(last) => last,
            None => return,
        };

        for promotion in promotions {
            let promo_month = (promotion.date.year(), promotion.date.month());
            let offset = months_between(last, promo_month);
            if offset < 1 || promotion.uplift <= 0.0 {
                continue;
            }

            if let Some(point) = points.iter_mut().find(|p| p.period_offset == offset as usize) {
                point.value = (point.value * promotion.uplift).max(0.0);
                point.adjustments.push(Adjustment {
                    kind: AdjustmentKind::PromotionUplift,
                    factor: promotion.uplift,
                    reason: format!("planned promotion {}", promotion.name),
                });
            }
        }
    }

    /// Apply a compounding inflation factor per forecast period
    ///
    /// Used by budget-forecast variants: period `k` is scaled by
    /// `(1 + annual_rate / 12)^k`.
    pub fn apply_inflation(&self, points: &mut [ForecastPoint], annual_rate: f64) {
        if annual_rate == 0.0 {
            return;
        }
        let monthly = 1.0 + annual_rate / 12.0;

        for point in points.iter_mut() {
            let factor = monthly.powi(point.period_offset as i32);
            point.value = (point.value * factor).max(0.0);
            point.adjustments.push(Adjustment {
                kind: AdjustmentKind::Inflation,
                factor,
                reason: format!("inflation at {:.2}% annual", annual_rate * 100.0),
            });
        }
    }
}
