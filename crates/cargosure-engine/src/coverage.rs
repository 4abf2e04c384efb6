//! Coverage intensity
//!
//! Picks the fraction of cargo value to insure from the risk tier, then
//! applies the Incoterm micro-adjustment. Terms that leave more logistics risk
//! with the shipper (EXW, FOB) push the ratio up; CIF, where insurance is
//! usually bought upstream, pulls it down.

use cargosure_common::{CoverageIntensity, RiskSummary};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::classifier::RiskTier;
use crate::scoring::round_to;
use crate::selector::{HIGH_CARGO_VALUE, TAIL_RISK_CONTRIBUTION};
use crate::trace::DecisionTrace;

pub const MIN_COVERAGE_RATIO: f64 = 0.2;
pub const MAX_COVERAGE_RATIO: f64 = 0.9;

/// Cargo value span over which medium-risk cover grows by 1.0
const MEDIUM_VALUE_SCALE: Decimal = dec!(10000000);

/// Ratio and confidence nudges for one Incoterm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncotermAdjustment {
    pub code: &'static str,
    pub ratio_delta: f64,
    pub confidence_delta: f64,
    pub note: &'static str,
}

impl IncotermAdjustment {
    /// Adjustment for an Incoterm such as "FOB" or "fob Shanghai", if any
    pub fn lookup(incoterm: &str) -> Option<Self> {
        let code = incoterm.split_whitespace().next()?.to_ascii_uppercase();
        match code.as_str() {
            "EXW" => Some(Self {
                code: "EXW",
                ratio_delta: 0.05,
                confidence_delta: 0.02,
                note: "shipper bears more logistics risk",
            }),
            "FOB" => Some(Self {
                code: "FOB",
                ratio_delta: 0.05,
                confidence_delta: 0.02,
                note: "shipper bears more logistics risk",
            }),
            "CIF" => Some(Self {
                code: "CIF",
                ratio_delta: -0.05,
                confidence_delta: 0.01,
                note: "insurance often bundled upstream",
            }),
            _ => None,
        }
    }
}

/// Coverage intensity plus the confidence nudge it implies
#[derive(Debug, Clone, PartialEq)]
pub struct CoveragePlan {
    pub intensity: CoverageIntensity,
    pub confidence_delta: f64,
}

pub struct CoverageCalculator;

impl CoverageCalculator {
    /// Tier-driven ratio before the Incoterm adjustment
    pub fn base_ratio(tier: RiskTier, summary: &RiskSummary) -> f64 {
        let tail = summary.loss_metrics.tail_contribution;
        let cargo_value = summary.shipment_profile.value_usd;

        match tier {
            RiskTier::High if tail >= TAIL_RISK_CONTRIBUTION => {
                (0.7 + (tail - TAIL_RISK_CONTRIBUTION) / 100.0).clamp(0.7, 0.9)
            }
            RiskTier::High => 0.6,
            RiskTier::Medium if cargo_value >= HIGH_CARGO_VALUE => {
                let excess = ((cargo_value - HIGH_CARGO_VALUE) / MEDIUM_VALUE_SCALE)
                    .to_f64()
                    .unwrap_or_default();
                (0.4 + excess).clamp(0.4, 0.6)
            }
            RiskTier::Medium => (0.3 + tail / 100.0).clamp(0.3, 0.4),
            RiskTier::Low => (0.2 + tail / 200.0).clamp(0.2, 0.3),
        }
    }

    /// Final ratio, coverage limit and Incoterm confidence nudge
    pub fn calculate(
        tier: RiskTier,
        summary: &RiskSummary,
        trace: &mut DecisionTrace,
    ) -> CoveragePlan {
        let mut ratio = Self::base_ratio(tier, summary);
        let mut confidence_delta = 0.0;

        if let Some(adjustment) = IncotermAdjustment::lookup(&summary.shipment_profile.incoterm) {
            ratio += adjustment.ratio_delta;
            confidence_delta = adjustment.confidence_delta;
            trace.record(format!(
                "Incoterm {} ({}): coverage ratio {:+.2}, confidence {:+.2}",
                adjustment.code, adjustment.note, adjustment.ratio_delta, adjustment.confidence_delta
            ));
        }

        let ratio = round_to(ratio.clamp(MIN_COVERAGE_RATIO, MAX_COVERAGE_RATIO), 3);

        CoveragePlan {
            intensity: CoverageIntensity {
                recommended_coverage_ratio: ratio,
                max_coverage_limit: coverage_limit(summary.shipment_profile.value_usd, ratio),
            },
            confidence_delta,
        }
    }
}

/// `cargo_value × ratio` rounded to whole USD; 0 without a positive value
fn coverage_limit(cargo_value: Decimal, ratio: f64) -> u64 {
    if cargo_value <= Decimal::ZERO {
        return 0;
    }
    let ratio = Decimal::new((ratio * 1000.0).round() as i64, 3);
    (cargo_value * ratio)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cargosure_common::{LossMetrics, RiskLevel, ShipmentProfile};

    fn summary(tail: f64, value: Decimal, incoterm: &str) -> RiskSummary {
        RiskSummary::new(50.0, RiskLevel::Medium)
            .with_loss_metrics(LossMetrics::new(dec!(1000), dec!(1500), tail))
            .with_shipment(ShipmentProfile::new(value, incoterm, "", ""))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_high_tier_ratios() {
        assert!(approx(
            CoverageCalculator::base_ratio(RiskTier::High, &summary(30.0, dec!(0), "")),
            0.75
        ));
        assert!(approx(
            CoverageCalculator::base_ratio(RiskTier::High, &summary(80.0, dec!(0), "")),
            0.9
        ));
        assert!(approx(
            CoverageCalculator::base_ratio(RiskTier::High, &summary(24.0, dec!(0), "")),
            0.6
        ));
    }

    #[test]
    fn test_medium_tier_ratios() {
        assert!(approx(
            CoverageCalculator::base_ratio(RiskTier::Medium, &summary(0.0, dec!(1500000), "")),
            0.5
        ));
        assert!(approx(
            CoverageCalculator::base_ratio(RiskTier::Medium, &summary(0.0, dec!(9000000), "")),
            0.6
        ));
        assert!(approx(
            CoverageCalculator::base_ratio(RiskTier::Medium, &summary(5.0, dec!(100000), "")),
            0.35
        ));
        assert!(approx(
            CoverageCalculator::base_ratio(RiskTier::Medium, &summary(40.0, dec!(100000), "")),
            0.4
        ));
    }

    #[test]
    fn test_low_tier_ratios() {
        assert!(approx(
            CoverageCalculator::base_ratio(RiskTier::Low, &summary(10.0, dec!(0), "")),
            0.25
        ));
        assert!(approx(
            CoverageCalculator::base_ratio(RiskTier::Low, &summary(90.0, dec!(0), "")),
            0.3
        ));
    }

    #[test]
    fn test_incoterm_lookup() {
        assert_eq!(IncotermAdjustment::lookup("exw").unwrap().code, "EXW");
        assert_eq!(IncotermAdjustment::lookup("FOB Shanghai").unwrap().code, "FOB");
        assert_eq!(IncotermAdjustment::lookup(" cif ").unwrap().ratio_delta, -0.05);
        assert!(IncotermAdjustment::lookup("DDP").is_none());
        assert!(IncotermAdjustment::lookup("").is_none());
    }

    #[test]
    fn test_incoterm_moves_ratio_and_traces() {
        let mut trace = DecisionTrace::new();
        let plan = CoverageCalculator::calculate(
            RiskTier::Medium,
            &summary(5.0, dec!(100000), "EXW"),
            &mut trace,
        );
        assert_eq!(plan.intensity.recommended_coverage_ratio, 0.4);
        assert_eq!(plan.intensity.max_coverage_limit, 40000);
        assert_eq!(plan.confidence_delta, 0.02);
        assert_eq!(trace.len(), 1);
        assert!(trace.entries()[0].contains("EXW"));

        let mut trace = DecisionTrace::new();
        let plan = CoverageCalculator::calculate(
            RiskTier::Medium,
            &summary(5.0, dec!(100000), "CIF"),
            &mut trace,
        );
        assert_eq!(plan.intensity.recommended_coverage_ratio, 0.3);
        assert_eq!(plan.confidence_delta, 0.01);
        assert!(trace.entries()[0].contains("CIF"));
    }

    #[test]
    fn test_ratio_is_reclamped_after_incoterm() {
        let mut trace = DecisionTrace::new();
        let plan = CoverageCalculator::calculate(
            RiskTier::High,
            &summary(90.0, dec!(100000), "FOB"),
            &mut trace,
        );
        assert_eq!(plan.intensity.recommended_coverage_ratio, MAX_COVERAGE_RATIO);

        let mut trace = DecisionTrace::new();
        let plan = CoverageCalculator::calculate(
            RiskTier::Low,
            &summary(0.0, dec!(100000), "CIF"),
            &mut trace,
        );
        assert_eq!(plan.intensity.recommended_coverage_ratio, MIN_COVERAGE_RATIO);
    }

    #[test]
    fn test_coverage_limit() {
        assert_eq!(coverage_limit(dec!(600000), 0.65), 390000);
        assert_eq!(coverage_limit(dec!(12345), 0.333), 4111);
        assert_eq!(coverage_limit(dec!(1), 0.5), 1);
        assert_eq!(coverage_limit(Decimal::ZERO, 0.9), 0);
        assert_eq!(coverage_limit(dec!(-500), 0.9), 0);
    }

    #[test]
    fn test_no_incoterm_no_trace() {
        let mut trace = DecisionTrace::new();
        let plan = CoverageCalculator::calculate(
            RiskTier::Low,
            &summary(10.0, dec!(0), "DAP"),
            &mut trace,
        );
        assert!(trace.is_empty());
        assert_eq!(plan.confidence_delta, 0.0);
        assert_eq!(plan.intensity.recommended_coverage_ratio, 0.25);
        assert_eq!(plan.intensity.max_coverage_limit, 0);
    }
}
