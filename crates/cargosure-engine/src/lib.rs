//! # Cargosure Engine
//!
//! Insurance decision engine for shipments. Converts the risk analytics of one
//! shipment into a recommendation: BUY / OPTIONAL / SKIP, a coverage tier and
//! ratio, a scored provider and a confidence value.
//!
//! ## Pipeline
//!
//! 1. Validation ([`RiskSummary::from_value`](cargosure_common::RiskSummary::from_value))
//! 2. Risk classification ([`classifier`])
//! 3. Action & coverage-type selection ([`selector`])
//! 4. Provider scoring ([`scoring`])
//! 5. Confidence ([`confidence`])
//! 6. Coverage intensity with Incoterm adjustment ([`coverage`])
//! 7. Rationale ([`rationale`])
//!
//! ```
//! use cargosure_engine::InsuranceDecisionEngine;
//! use serde_json::json;
//!
//! let engine = InsuranceDecisionEngine::new();
//! let decision = engine
//!     .evaluate(&json!({"finalRiskScore": 75, "riskLevel": "LOW"}))
//!     .unwrap();
//! assert_eq!(decision.action.as_str(), "BUY");
//! ```

pub mod catalog;
pub mod classifier;
pub mod confidence;
pub mod coverage;
pub mod engine;
pub mod rationale;
pub mod scoring;
pub mod selector;
pub mod trace;

pub use catalog::{ProviderCatalog, ProviderProfile};
pub use classifier::{RiskSignals, RiskTier};
pub use engine::{recommend_insurance, InsuranceDecisionEngine};
pub use scoring::{ProviderScore, ProviderScorer};
pub use trace::DecisionTrace;

pub use cargosure_common::{
    CargosureError, CoverageIntensity, CoverageType, InputError, InsuranceAction,
    InsuranceDecision, ProviderRecommendation, Result, RiskLevel, RiskSummary,
};
