//! Risk classification
//!
//! Two signals feed the tier: the upstream `riskLevel` label and the numeric
//! `finalRiskScore`. Either one alone is enough to raise a predicate, so the
//! three predicates can overlap (LOW label with a score of 75 is both high and
//! low). [`RiskSignals::tier`] resolves overlaps HIGH, then MEDIUM, then LOW.

use cargosure_common::{RiskLevel, RiskSummary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score at or above which a shipment is high risk
pub const HIGH_RISK_SCORE: f64 = 70.0;

/// Score at or above which a shipment is at least medium risk
pub const MEDIUM_RISK_SCORE: f64 = 40.0;

/// Canonical tier after priority resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        })
    }
}

/// Raw, possibly overlapping tier predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskSignals {
    pub is_high_risk: bool,
    pub is_medium_risk: bool,
    pub is_low_risk: bool,
}

impl RiskSignals {
    /// Evaluate all three predicates independently
    pub fn classify(summary: &RiskSummary) -> Self {
        let score = summary.final_risk_score;
        let level = &summary.risk_level;

        Self {
            is_high_risk: level.is_elevated() || score >= HIGH_RISK_SCORE,
            is_medium_risk: *level == RiskLevel::Medium
                || (score >= MEDIUM_RISK_SCORE && score < HIGH_RISK_SCORE),
            is_low_risk: *level == RiskLevel::Low || score < MEDIUM_RISK_SCORE,
        }
    }

    /// First matching tier in HIGH, MEDIUM, LOW order
    pub fn tier(&self) -> RiskTier {
        if self.is_high_risk {
            RiskTier::High
        } else if self.is_medium_risk {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}
