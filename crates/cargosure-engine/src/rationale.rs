//! Rationale assembly
//!
//! Pure templating over values that are already decided.

use cargosure_common::{CoverageType, InsuranceAction, ProviderRecommendation, RiskSummary};
use rust_decimal::Decimal;

/// Action-specific clause
fn verdict(action: InsuranceAction, coverage_type: CoverageType) -> String {
    match action {
        InsuranceAction::Buy => format!("requires {} insurance coverage", coverage_type),
        InsuranceAction::Optional => {
            format!("suggests optional {} insurance coverage", coverage_type)
        }
        InsuranceAction::Skip => "indicates insurance may not be necessary".to_string(),
    }
}

/// Compose the explanation shown next to a decision
pub fn compose(
    summary: &RiskSummary,
    action: InsuranceAction,
    coverage_type: CoverageType,
    provider: &ProviderRecommendation,
) -> String {
    let mut text = format!(
        "{} risk level (score {:.1})",
        summary.risk_level, summary.final_risk_score
    );

    let p99 = summary.loss_metrics.p99;
    if p99 > Decimal::ZERO {
        text.push_str(&format!(" with P99 loss exposure of ${}", p99.round()));
    }

    text.push(' ');
    text.push_str(&verdict(action, coverage_type));
    text.push_str(&format!(
        ". Recommended provider: {} ({}).",
        provider.name, provider.reason
    ));
    text
}
