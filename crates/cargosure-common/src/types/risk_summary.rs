//! Risk Summary - the engine's input record
//!
//! Produced by the upstream risk analytics stage. Upstream records are loosely
//! shaped JSON, so [`RiskSummary::from_value`] is the single place where that
//! shape is checked and normalized:
//! - `finalRiskScore` and `riskLevel` are required
//! - every other field is defaulted (monetary values to 0, text to empty,
//!   `uncertaintyLevel` to 0.8)
//! - `riskLevel` is case-normalized into [`RiskLevel`]

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;
use crate::{DEFAULT_UNCERTAINTY_LEVEL, ROUTE_PLACEHOLDER};

/// Textual risk tier reported by the upstream stage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    /// Any label the engine does not recognise; kept verbatim (upper-cased)
    Other(String),
}

impl RiskLevel {
    /// Parse a label case-insensitively
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "LOW" => RiskLevel::Low,
            "MEDIUM" => RiskLevel::Medium,
            "HIGH" => RiskLevel::High,
            "CRITICAL" => RiskLevel::Critical,
            _ => RiskLevel::Other(normalized),
        }
    }

    /// Canonical upper-case label
    pub fn label(&self) -> &str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::Other(label) => label,
        }
    }

    /// HIGH or CRITICAL
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

impl From<String> for RiskLevel {
    fn from(label: String) -> Self {
        RiskLevel::parse(&label)
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        level.label().to_string()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tail-loss figures from the upstream loss simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LossMetrics {
    /// 95th percentile loss (USD)
    pub p95: Decimal,
    /// 99th percentile loss (USD)
    pub p99: Decimal,
    /// Share of expected loss coming from the tail (0-100)
    pub tail_contribution: f64,
}

impl LossMetrics {
    pub fn new(p95: Decimal, p99: Decimal, tail_contribution: f64) -> Self {
        Self {
            p95,
            p99,
            tail_contribution,
        }
    }

    /// Both percentiles were reported
    pub fn is_available(&self) -> bool {
        !self.p95.is_zero() && !self.p99.is_zero()
    }

    /// `(p99 - p95) / p95`, only defined for a positive P95.
    ///
    /// Falls back to floating point when the exact ratio leaves the Decimal
    /// range, so extreme spreads come out huge rather than failing.
    pub fn spread_ratio(&self) -> Option<f64> {
        if self.p95 <= Decimal::ZERO {
            return None;
        }
        let exact = self
            .p99
            .checked_sub(self.p95)
            .and_then(|diff| diff.checked_div(self.p95))
            .and_then(|ratio| ratio.to_f64());
        match exact {
            Some(spread) => Some(spread),
            None => {
                let p95 = self.p95.to_f64()?;
                let p99 = self.p99.to_f64()?;
                Some((p99 - p95) / p95)
            }
        }
    }

    fn from_record(record: &Map<String, Value>) -> Self {
        Self {
            p95: record.get("p95").and_then(lenient_decimal).unwrap_or_default(),
            p99: record.get("p99").and_then(lenient_decimal).unwrap_or_default(),
            tail_contribution: record
                .get("tailContribution")
                .and_then(lenient_f64)
                .unwrap_or_default(),
        }
    }
}

/// Shipment attributes entered by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentProfile {
    /// Declared cargo value (USD)
    pub value_usd: Decimal,
    /// Incoterm code, e.g. "FOB"
    pub incoterm: String,
    /// Free-text route, e.g. "Shanghai to Rotterdam"
    pub route: String,
    /// Free-text cargo description
    pub cargo: String,
}

impl ShipmentProfile {
    pub fn new(
        value_usd: Decimal,
        incoterm: impl Into<String>,
        route: impl Into<String>,
        cargo: impl Into<String>,
    ) -> Self {
        Self {
            value_usd,
            incoterm: incoterm.into(),
            route: route.into(),
            cargo: cargo.into(),
        }
    }

    /// A real route was entered (not blank, not the form placeholder)
    pub fn has_route(&self) -> bool {
        let route = self.route.trim();
        !route.is_empty() && route != ROUTE_PLACEHOLDER
    }

    fn from_record(record: &Map<String, Value>) -> Self {
        let text = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default()
        };

        Self {
            value_usd: record
                .get("value_usd")
                .and_then(lenient_decimal)
                .unwrap_or_default(),
            incoterm: text("incoterm"),
            route: text("route"),
            cargo: text("cargo"),
        }
    }
}

/// Validated, fully defaulted risk summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    /// Composite risk score, nominally 0-100 (not clamped)
    pub final_risk_score: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub loss_metrics: LossMetrics,
    #[serde(default)]
    pub shipment_profile: ShipmentProfile,
    /// Confidence seed (0-1)
    #[serde(default = "default_uncertainty_level")]
    pub uncertainty_level: f64,
}

fn default_uncertainty_level() -> f64 {
    DEFAULT_UNCERTAINTY_LEVEL
}

impl RiskSummary {
    /// Create a summary with only the required fields
    pub fn new(final_risk_score: f64, risk_level: RiskLevel) -> Self {
        Self {
            final_risk_score,
            risk_level,
            loss_metrics: LossMetrics::default(),
            shipment_profile: ShipmentProfile::default(),
            uncertainty_level: DEFAULT_UNCERTAINTY_LEVEL,
        }
    }

    /// Set loss metrics
    pub fn with_loss_metrics(mut self, loss_metrics: LossMetrics) -> Self {
        self.loss_metrics = loss_metrics;
        self
    }

    /// Set shipment profile
    pub fn with_shipment(mut self, shipment_profile: ShipmentProfile) -> Self {
        self.shipment_profile = shipment_profile;
        self
    }

    /// Set uncertainty level
    pub fn with_uncertainty(mut self, uncertainty_level: f64) -> Self {
        self.uncertainty_level = uncertainty_level;
        self
    }

    /// Validate and normalize an upstream JSON record.
    ///
    /// Only a non-object value, a missing score or a missing/non-string
    /// risk level is rejected; every other field is defaulted.
    pub fn from_value(value: &Value) -> Result<Self, InputError> {
        let record = value.as_object().ok_or(InputError::NotARecord)?;

        let final_risk_score = match record.get("finalRiskScore") {
            None | Some(Value::Null) => return Err(InputError::MissingRiskScore),
            Some(raw) => {
                lenient_f64(raw).ok_or_else(|| InputError::InvalidRiskScore(raw.to_string()))?
            }
        };

        let risk_level = match record.get("riskLevel") {
            None | Some(Value::Null) => return Err(InputError::MissingRiskLevel),
            Some(Value::String(label)) if label.trim().is_empty() => {
                return Err(InputError::MissingRiskLevel)
            }
            Some(Value::String(label)) => RiskLevel::parse(label),
            Some(_) => return Err(InputError::InvalidRiskLevel),
        };

        let loss_metrics = record
            .get("lossMetrics")
            .and_then(Value::as_object)
            .map(LossMetrics::from_record)
            .unwrap_or_default();

        let shipment_profile = record
            .get("shipmentProfile")
            .and_then(Value::as_object)
            .map(ShipmentProfile::from_record)
            .unwrap_or_default();

        let uncertainty_level = record
            .get("uncertaintyLevel")
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_UNCERTAINTY_LEVEL);

        Ok(Self {
            final_risk_score,
            risk_level,
            loss_metrics,
            shipment_profile,
            uncertainty_level,
        })
    }
}

impl TryFrom<&Value> for RiskSummary {
    type Error = InputError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Number or numeric string as f64
fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Number or numeric string as Decimal
fn lenient_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_u64().map(Decimal::from))
            .or_else(|| n.as_f64().and_then(saturating_decimal)),
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(saturating_decimal))
        }
        _ => None,
    }
}

/// Finite floats outside the Decimal range clamp to its bounds; magnitudes
/// below its precision round to zero. NaN and infinities are rejected.
fn saturating_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    match Decimal::from_f64(value) {
        Some(decimal) => Some(decimal),
        None if value.abs() < 1.0 => Some(Decimal::ZERO),
        None if value > 0.0 => Some(Decimal::MAX),
        None => Some(Decimal::MIN),
    }
}
