//! Insurance Decision - the engine's output record
//!
//! Downstream renderers only read the documented fields, so the serialized
//! shape (camelCase keys, upper-case enum labels) is part of the contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recommended purchase action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsuranceAction {
    /// Insurance is required for this exposure
    Buy,
    /// Insurance is worth considering
    Optional,
    /// Insurance is likely unnecessary
    Skip,
}

impl InsuranceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceAction::Buy => "BUY",
            InsuranceAction::Optional => "OPTIONAL",
            InsuranceAction::Skip => "SKIP",
        }
    }
}

impl fmt::Display for InsuranceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage tier, broadest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageType {
    /// Cover weighted towards extreme-loss outcomes
    TailRisk,
    Full,
    Standard,
    Basic,
}

impl CoverageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageType::TailRisk => "TAIL_RISK",
            CoverageType::Full => "FULL",
            CoverageType::Standard => "STANDARD",
            CoverageType::Basic => "BASIC",
        }
    }
}

impl fmt::Display for CoverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Winning provider with its composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecommendation {
    pub name: String,
    /// Composite fit score (0-1, 2 decimals)
    pub score: f64,
    pub reason: String,
}

/// How much of the cargo value to insure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageIntensity {
    /// Fraction of cargo value (0.2-0.9, 3 decimals)
    pub recommended_coverage_ratio: f64,
    /// Cargo value times ratio, rounded to whole USD
    pub max_coverage_limit: u64,
}

/// Complete engine output for one risk summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceDecision {
    pub action: InsuranceAction,
    pub coverage_type: CoverageType,
    pub recommended_provider: ProviderRecommendation,
    /// Decision confidence (0.5-0.95, 2 decimals)
    pub confidence: f64,
    pub rationale: String,
    /// Rules that fired, in evaluation order
    pub decision_trace: Vec<String>,
    pub coverage_intensity: CoverageIntensity,
}

impl InsuranceDecision {
    /// Whether any insurance purchase is suggested
    pub fn recommends_cover(&self) -> bool {
        self.action != InsuranceAction::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> InsuranceDecision {
        InsuranceDecision {
            action: InsuranceAction::Buy,
            coverage_type: CoverageType::TailRisk,
            recommended_provider: ProviderRecommendation {
                name: "Asia-Pacific Specialized".to_string(),
                score: 0.91,
                reason: "Optimal route specialization".to_string(),
            },
            confidence: 0.95,
            rationale: "HIGH risk".to_string(),
            decision_trace: vec!["rule".to_string()],
            coverage_intensity: CoverageIntensity {
                recommended_coverage_ratio: 0.75,
                max_coverage_limit: 450_000,
            },
        }
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["action"], json!("BUY"));
        assert_eq!(value["coverageType"], json!("TAIL_RISK"));
        assert_eq!(value["recommendedProvider"]["score"], json!(0.91));
        assert_eq!(
            value["coverageIntensity"]["recommendedCoverageRatio"],
            json!(0.75)
        );
        assert_eq!(value["coverageIntensity"]["maxCoverageLimit"], json!(450000));
        assert_eq!(value["decisionTrace"], json!(["rule"]));
    }

    #[test]
    fn test_recommends_cover() {
        let mut decision = sample();
        assert!(decision.recommends_cover());
        decision.action = InsuranceAction::Skip;
        assert!(!decision.recommends_cover());
    }

    #[test]
    fn test_labels_match_serde() {
        for coverage in [
            CoverageType::TailRisk,
            CoverageType::Full,
            CoverageType::Standard,
            CoverageType::Basic,
        ] {
            assert_eq!(
                serde_json::to_value(coverage).unwrap(),
                json!(coverage.as_str())
            );
        }
        assert_eq!(InsuranceAction::Optional.to_string(), "OPTIONAL");
    }
}
