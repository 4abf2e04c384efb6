//! Confidence calculation
//!
//! Starts from the upstream uncertainty level, rewards data completeness, then
//! scales by how stable the loss distribution looks:
//!
//! ```text
//! spread = (p99 - p95) / p95
//! spread <= 1.2  => × 1.05
//! spread >= 2.0  => × 0.90
//! ```

use cargosure_common::RiskSummary;
use rust_decimal::Decimal;

use crate::scoring::round_to;

pub const MIN_CONFIDENCE: f64 = 0.5;
pub const MAX_CONFIDENCE: f64 = 0.95;

pub const LOSS_METRICS_BONUS: f64 = 0.10;
pub const CARGO_VALUE_BONUS: f64 = 0.05;
pub const ROUTE_BONUS: f64 = 0.05;

pub const NARROW_SPREAD: f64 = 1.2;
pub const WIDE_SPREAD: f64 = 2.0;
pub const NARROW_SPREAD_FACTOR: f64 = 1.05;
pub const WIDE_SPREAD_FACTOR: f64 = 0.9;

pub struct ConfidenceCalculator;

impl ConfidenceCalculator {
    /// Confidence before the Incoterm nudge and the final clamp
    pub fn calculate(summary: &RiskSummary) -> f64 {
        let metrics = &summary.loss_metrics;
        let shipment = &summary.shipment_profile;
        let mut confidence = summary.uncertainty_level;

        if metrics.is_available() {
            confidence = (confidence + LOSS_METRICS_BONUS).min(MAX_CONFIDENCE);
        }
        if shipment.value_usd > Decimal::ZERO {
            confidence = (confidence + CARGO_VALUE_BONUS).min(MAX_CONFIDENCE);
        }
        if shipment.has_route() {
            confidence = (confidence + ROUTE_BONUS).min(MAX_CONFIDENCE);
        }

        match metrics.spread_ratio() {
            Some(spread) if spread <= NARROW_SPREAD => confidence * NARROW_SPREAD_FACTOR,
            Some(spread) if spread >= WIDE_SPREAD => confidence * WIDE_SPREAD_FACTOR,
            _ => confidence,
        }
    }

    /// Clamp to [0.5, 0.95] and round to 2 decimals
    pub fn finalize(confidence: f64) -> f64 {
        round_to(confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE), 2)
    }
}
