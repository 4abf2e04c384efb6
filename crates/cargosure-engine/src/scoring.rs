//! Provider scoring
//!
//! Every candidate is scored on three independent axes in [0, 1]:
//!
//! ```text
//! score = 0.4 × route_fit + 0.3 × cargo_fit + 0.3 × stability
//! ```
//!
//! The highest composite wins; ties go to the earlier catalog entry.

use cargosure_common::{ProviderRecommendation, RiskSummary};
use serde::{Deserialize, Serialize};

use crate::catalog::{ProviderCatalog, ProviderProfile};
use crate::classifier::RiskSignals;

pub const ROUTE_WEIGHT: f64 = 0.4;
pub const CARGO_WEIGHT: f64 = 0.3;
pub const STABILITY_WEIGHT: f64 = 0.3;

/// Route fit for a specialist whose region is on the route
pub const ROUTE_MATCH_FIT: f64 = 0.95;
/// Route fit for a generalist
pub const ROUTE_GENERALIST_FIT: f64 = 0.5;
/// Route fit for a specialist whose region is off the route
pub const ROUTE_MISMATCH_FIT: f64 = 0.3;

/// Stability bonus when the shipment is high risk
pub const HIGH_RISK_STABILITY_BONUS: f64 = 0.10;
pub const MAX_STABILITY: f64 = 0.95;
/// Stability discount when the shipment is low risk
pub const LOW_RISK_STABILITY_DISCOUNT: f64 = 0.05;
pub const MIN_STABILITY: f64 = 0.60;

/// Reason used when no sub-score clears a threshold
pub const DEFAULT_REASON: &str = "Standard coverage available";

/// One candidate's sub-scores and composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderScore {
    pub name: String,
    pub route_fit: f64,
    pub cargo_fit: f64,
    pub stability: f64,
    pub score: f64,
}

impl ProviderScore {
    /// Explain the fit by thresholding each sub-score independently
    pub fn reason(&self) -> String {
        let mut parts = Vec::new();

        if self.route_fit >= 0.9 {
            parts.push("optimal route specialization");
        } else if self.route_fit >= 0.5 {
            parts.push("adequate route coverage");
        }

        if self.cargo_fit >= 0.85 {
            parts.push("specialized cargo expertise");
        } else if self.cargo_fit >= 0.6 {
            parts.push("suitable cargo handling");
        }

        if self.stability >= 0.8 {
            parts.push("strong financial stability");
        } else if self.stability >= 0.7 {
            parts.push("reliable claims history");
        }

        if parts.is_empty() {
            return DEFAULT_REASON.to_string();
        }
        capitalize(&parts.join(", "))
    }

    /// Output form with the score rounded to 2 decimals
    pub fn to_recommendation(&self) -> ProviderRecommendation {
        ProviderRecommendation {
            name: self.name.clone(),
            score: round_to(self.score, 2),
            reason: self.reason(),
        }
    }
}

/// Scores a catalog against one shipment
pub struct ProviderScorer<'a> {
    catalog: &'a ProviderCatalog,
}

impl<'a> ProviderScorer<'a> {
    pub fn new(catalog: &'a ProviderCatalog) -> Self {
        Self { catalog }
    }

    /// Score every candidate, in catalog order
    pub fn score_all(&self, summary: &RiskSummary, signals: &RiskSignals) -> Vec<ProviderScore> {
        let route = summary.shipment_profile.route.to_ascii_uppercase();
        let high_value_cargo = self
            .catalog
            .is_high_value_cargo(&summary.shipment_profile.cargo);

        self.catalog
            .providers
            .iter()
            .map(|provider| {
                let route_fit = route_fit(provider, &route);
                let cargo_fit = cargo_fit(provider, high_value_cargo);
                let stability = stability(provider, signals);
                ProviderScore {
                    name: provider.name.clone(),
                    route_fit,
                    cargo_fit,
                    stability,
                    score: ROUTE_WEIGHT * route_fit
                        + CARGO_WEIGHT * cargo_fit
                        + STABILITY_WEIGHT * stability,
                }
            })
            .collect()
    }

    /// Highest composite score; the first candidate wins ties
    pub fn best(&self, summary: &RiskSummary, signals: &RiskSignals) -> Option<ProviderScore> {
        self.score_all(summary, signals)
            .into_iter()
            .reduce(|best, candidate| {
                if candidate.score > best.score {
                    candidate
                } else {
                    best
                }
            })
    }
}

fn route_fit(provider: &ProviderProfile, route_upper: &str) -> f64 {
    if provider.is_generalist() {
        ROUTE_GENERALIST_FIT
    } else if provider.serves_route(route_upper) {
        ROUTE_MATCH_FIT
    } else {
        ROUTE_MISMATCH_FIT
    }
}

fn cargo_fit(provider: &ProviderProfile, high_value_cargo: bool) -> f64 {
    match (high_value_cargo, provider.high_value_specialist, provider.is_generalist()) {
        (true, true, _) => 0.90,
        (true, false, _) => 0.70,
        (false, _, true) => 0.60,
        (false, _, false) => 0.75,
    }
}

fn stability(provider: &ProviderProfile, signals: &RiskSignals) -> f64 {
    let base = provider.base_stability;
    if signals.is_high_risk {
        (base + HIGH_RISK_STABILITY_BONUS).min(MAX_STABILITY)
    } else if signals.is_low_risk {
        (base - LOW_RISK_STABILITY_DISCOUNT).max(MIN_STABILITY)
    } else {
        base
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Round half away from zero to `places` decimals
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use cargosure_common::{RiskLevel, ShipmentProfile};
    use rust_decimal::Decimal;

    fn shipment_summary(score: f64, level: &str, route: &str, cargo: &str) -> RiskSummary {
        RiskSummary::new(score, RiskLevel::parse(level)).with_shipment(ShipmentProfile::new(
            Decimal::ZERO,
            "",
            route,
            cargo,
        ))
    }

    fn scores(summary: &RiskSummary) -> Vec<ProviderScore> {
        let catalog = ProviderCatalog::default();
        let signals = RiskSignals::classify(summary);
        ProviderScorer::new(&catalog).score_all(summary, &signals)
    }

    #[test]
    fn test_route_fit_values() {
        let all = scores(&shipment_summary(50.0, "MEDIUM", "Shanghai to Rotterdam", ""));

        assert_eq!(all[0].route_fit, ROUTE_MATCH_FIT);
        assert_eq!(all[1].route_fit, ROUTE_MATCH_FIT);
        assert_eq!(all[2].route_fit, ROUTE_MISMATCH_FIT);
        assert_eq!(all[3].route_fit, ROUTE_GENERALIST_FIT);
    }

    #[test]
    fn test_cargo_fit_values() {
        let high_value = scores(&shipment_summary(50.0, "MEDIUM", "", "Electronics"));
        let fits: Vec<f64> = high_value.iter().map(|s| s.cargo_fit).collect();
        assert_eq!(fits, vec![0.90, 0.70, 0.90, 0.70]);

        let ordinary = scores(&shipment_summary(50.0, "MEDIUM", "", "Textiles"));
        let fits: Vec<f64> = ordinary.iter().map(|s| s.cargo_fit).collect();
        assert_eq!(fits, vec![0.75, 0.75, 0.75, 0.60]);
    }

    #[test]
    fn test_stability_adjusts_with_risk() {
        let high = scores(&shipment_summary(90.0, "HIGH", "", ""));
        let stabilities: Vec<f64> = high.iter().map(|s| s.stability).collect();
        assert!((stabilities[0] - 0.85).abs() < 1e-9);
        assert!((stabilities[1] - 0.90).abs() < 1e-9);
        assert!((stabilities[2] - 0.80).abs() < 1e-9);
        assert!((stabilities[3] - 0.75).abs() < 1e-9);

        let medium = scores(&shipment_summary(50.0, "MEDIUM", "", ""));
        assert_eq!(medium[1].stability, 0.80);

        let low = scores(&shipment_summary(10.0, "LOW", "", ""));
        let stabilities: Vec<f64> = low.iter().map(|s| s.stability).collect();
        assert!((stabilities[0] - 0.70).abs() < 1e-9);
        assert!((stabilities[1] - 0.75).abs() < 1e-9);
        assert!((stabilities[2] - 0.65).abs() < 1e-9);
        assert!((stabilities[3] - MIN_STABILITY).abs() < 1e-9);
    }

    #[test]
    fn test_best_prefers_aligned_specialist() {
        let summary = shipment_summary(72.0, "HIGH", "Shanghai-Los Angeles", "Electronics");
        let catalog = ProviderCatalog::default();
        let signals = RiskSignals::classify(&summary);
        let scorer = ProviderScorer::new(&catalog);

        let best = scorer.best(&summary, &signals).unwrap();
        assert_eq!(best.name, "Asia-Pacific Specialized");
        for other in scorer.score_all(&summary, &signals) {
            assert!(best.score >= other.score);
        }
        assert_eq!(
            best.reason(),
            "Optimal route specialization, specialized cargo expertise, strong financial stability"
        );
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let catalog = ProviderCatalog::new(vec![
            ProviderProfile::new("First", 0.7),
            ProviderProfile::new("Second", 0.7),
        ])
        .unwrap();
        let summary = shipment_summary(50.0, "MEDIUM", "Anywhere", "Boxes");
        let signals = RiskSignals::classify(&summary);

        let best = ProviderScorer::new(&catalog).best(&summary, &signals).unwrap();
        assert_eq!(best.name, "First");
    }

    #[test]
    fn test_reason_falls_back_to_default() {
        let weak = ProviderScore {
            name: "Weak".to_string(),
            route_fit: 0.3,
            cargo_fit: 0.5,
            stability: 0.6,
            score: 0.42,
        };
        assert_eq!(weak.reason(), DEFAULT_REASON);

        let recommendation = weak.to_recommendation();
        assert_eq!(recommendation.score, 0.42);
        assert_eq!(recommendation.reason, DEFAULT_REASON);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 2), 0.12);
        assert_eq!(round_to(0.3999999999, 3), 0.4);
        assert_eq!(round_to(0.635, 1), 0.6);
    }
}
