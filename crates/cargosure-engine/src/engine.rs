//! Insurance decision engine
//!
//! Single pass over one risk summary:
//! classify → select action → score providers → confidence → coverage
//! intensity → rationale. No state survives a call; the engine only holds the
//! read-only provider catalog and can be shared across threads.

use cargosure_common::{InsuranceDecision, ProviderRecommendation, Result, RiskSummary};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::catalog::ProviderCatalog;
use crate::classifier::RiskSignals;
use crate::confidence::ConfidenceCalculator;
use crate::coverage::CoverageCalculator;
use crate::rationale;
use crate::scoring::{ProviderScore, ProviderScorer, DEFAULT_REASON};
use crate::selector::select_action;
use crate::trace::DecisionTrace;

/// Turns risk summaries into insurance decisions
#[derive(Debug, Clone, Default)]
pub struct InsuranceDecisionEngine {
    catalog: ProviderCatalog,
}

impl InsuranceDecisionEngine {
    /// Engine with the built-in provider catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom catalog
    pub fn with_catalog(catalog: ProviderCatalog) -> Result<Self> {
        catalog.validate()?;
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    /// Decide for an upstream JSON record; `None` when the record is invalid
    pub fn evaluate(&self, input: &Value) -> Option<InsuranceDecision> {
        match self.try_evaluate(input) {
            Ok(decision) => Some(decision),
            Err(err) => {
                debug!(error = %err, "Risk summary rejected, decision unavailable");
                None
            }
        }
    }

    /// Decide for an upstream JSON record, reporting why it was rejected
    pub fn try_evaluate(&self, input: &Value) -> Result<InsuranceDecision> {
        let summary = RiskSummary::from_value(input)?;
        Ok(self.decide(&summary))
    }

    /// Evaluate each element of a JSON array; any other value is a batch of one
    pub fn evaluate_batch(&self, input: &Value) -> Vec<Option<InsuranceDecision>> {
        match input {
            Value::Array(records) => records.iter().map(|r| self.evaluate(r)).collect(),
            other => vec![self.evaluate(other)],
        }
    }

    /// Every candidate's sub-scores for a summary, in catalog order
    pub fn score_providers(&self, summary: &RiskSummary) -> Vec<ProviderScore> {
        let signals = RiskSignals::classify(summary);
        ProviderScorer::new(&self.catalog).score_all(summary, &signals)
    }

    /// Run the full pipeline on a validated summary
    #[instrument(
        skip_all,
        fields(score = summary.final_risk_score, level = %summary.risk_level)
    )]
    pub fn decide(&self, summary: &RiskSummary) -> InsuranceDecision {
        let mut trace = DecisionTrace::new();

        let signals = RiskSignals::classify(summary);
        let selection = select_action(summary, &signals, &mut trace);
        debug!(
            tier = %selection.tier,
            action = %selection.action,
            coverage = %selection.coverage_type,
            "Action selected"
        );

        let recommended_provider = ProviderScorer::new(&self.catalog)
            .best(summary, &signals)
            .map(|best| best.to_recommendation())
            .unwrap_or_else(|| ProviderRecommendation {
                name: String::new(),
                score: 0.0,
                reason: DEFAULT_REASON.to_string(),
            });
        trace.record(format!(
            "Provider {} selected (score {:.2})",
            recommended_provider.name, recommended_provider.score
        ));

        let raw_confidence = ConfidenceCalculator::calculate(summary);
        let plan = CoverageCalculator::calculate(selection.tier, summary, &mut trace);
        let confidence = ConfidenceCalculator::finalize(raw_confidence + plan.confidence_delta);
        debug!(
            confidence,
            ratio = plan.intensity.recommended_coverage_ratio,
            limit = plan.intensity.max_coverage_limit,
            "Coverage computed"
        );

        let rationale = rationale::compose(
            summary,
            selection.action,
            selection.coverage_type,
            &recommended_provider,
        );

        InsuranceDecision {
            action: selection.action,
            coverage_type: selection.coverage_type,
            recommended_provider,
            confidence,
            rationale,
            decision_trace: trace.into_entries(),
            coverage_intensity: plan.intensity,
        }
    }
}

/// Decide with the built-in catalog
pub fn recommend_insurance(input: &Value) -> Option<InsuranceDecision> {
    InsuranceDecisionEngine::new().evaluate(input)
}
