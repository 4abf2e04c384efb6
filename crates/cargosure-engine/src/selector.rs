//! Action & coverage-type selection
//!
//! Rules are evaluated top to bottom and the first matching tier is terminal.
//! Each rule that fires records its justification in the decision trace.

use cargosure_common::{CoverageType, InsuranceAction, LossMetrics, RiskLevel, RiskSummary};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::classifier::{RiskSignals, RiskTier};
use crate::trace::DecisionTrace;

/// Tail contribution (%) that calls for tail-risk cover on high-risk cargo
pub const TAIL_RISK_CONTRIBUTION: f64 = 25.0;
/// P99 / P95 multiple that calls for tail-risk cover on high-risk cargo
pub const TAIL_SPREAD_MULTIPLE: Decimal = dec!(2);
/// Score at or above which high-risk cargo gets full cover
pub const FULL_COVERAGE_SCORE: f64 = 80.0;
/// Cargo value (USD) at or above which medium-risk cargo gets standard cover
pub const HIGH_CARGO_VALUE: Decimal = dec!(500000);
/// Tail contribution (%) at or above which medium-risk cargo gets standard cover
pub const MEDIUM_TAIL_CONTRIBUTION: f64 = 20.0;
/// Low-risk cargo may skip insurance only below this tail contribution (%)
pub const SKIP_MAX_TAIL_CONTRIBUTION: f64 = 15.0;
/// Low-risk cargo may skip insurance only below this P99 loss (USD)
pub const SKIP_MAX_P99: Decimal = dec!(100000);

/// Selected action and coverage tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSelection {
    pub tier: RiskTier,
    pub action: InsuranceAction,
    pub coverage_type: CoverageType,
}

/// Choose the action and coverage tier for a classified summary
pub fn select_action(
    summary: &RiskSummary,
    signals: &RiskSignals,
    trace: &mut DecisionTrace,
) -> ActionSelection {
    let tier = signals.tier();
    let score = summary.final_risk_score;
    let level = &summary.risk_level;
    let metrics = &summary.loss_metrics;
    let tail = metrics.tail_contribution;
    let cargo_value = summary.shipment_profile.value_usd;

    let (action, coverage_type) = match tier {
        RiskTier::High => {
            trace.record(format!(
                "High risk (level {}, score {}): insurance purchase required",
                level, score
            ));

            let coverage_type = if tail >= TAIL_RISK_CONTRIBUTION
                || tail_spread_exceeded(metrics)
            {
                trace.record(format!(
                    "Tail exposure concentrated (tail contribution {}%, P99 {} vs P95 {}): tail-risk coverage",
                    tail, metrics.p99, metrics.p95
                ));
                CoverageType::TailRisk
            } else if score >= FULL_COVERAGE_SCORE || *level == RiskLevel::Critical {
                trace.record(format!(
                    "Severe risk (score {} or CRITICAL level): full coverage",
                    score
                ));
                CoverageType::Full
            } else {
                trace.record("No tail concentration and score below 80: standard coverage");
                CoverageType::Standard
            };

            (InsuranceAction::Buy, coverage_type)
        }
        RiskTier::Medium => {
            trace.record(format!(
                "Medium risk (level {}, score {}): insurance optional",
                level, score
            ));

            let coverage_type =
                if cargo_value >= HIGH_CARGO_VALUE || tail >= MEDIUM_TAIL_CONTRIBUTION {
                    trace.record(format!(
                        "Cargo value ${} or tail contribution {}% is material: standard coverage",
                        cargo_value, tail
                    ));
                    CoverageType::Standard
                } else {
                    trace.record("Moderate value and tail exposure: basic coverage");
                    CoverageType::Basic
                };

            (InsuranceAction::Optional, coverage_type)
        }
        RiskTier::Low => {
            if tail < SKIP_MAX_TAIL_CONTRIBUTION
                && metrics.p99 < SKIP_MAX_P99
                && cargo_value < HIGH_CARGO_VALUE
            {
                trace.record(format!(
                    "Low risk with limited exposure (tail contribution {}%, P99 ${}, cargo value ${}): insurance can be skipped",
                    tail, metrics.p99, cargo_value
                ));
                (InsuranceAction::Skip, CoverageType::Basic)
            } else {
                trace.record(format!(
                    "Low risk but notable exposure (tail contribution {}%, P99 ${}, cargo value ${}): basic coverage optional",
                    tail, metrics.p99, cargo_value
                ));
                (InsuranceAction::Optional, CoverageType::Basic)
            }
        }
    };

    ActionSelection {
        tier,
        action,
        coverage_type,
    }
}

/// `p99 > 2 × p95`; a doubled P95 beyond the Decimal range bounds every P99
/// on the side of P95's sign
fn tail_spread_exceeded(metrics: &LossMetrics) -> bool {
    match metrics.p95.checked_mul(TAIL_SPREAD_MULTIPLE) {
        Some(limit) => metrics.p99 > limit,
        None => metrics.p95.is_sign_negative(),
    }
}
