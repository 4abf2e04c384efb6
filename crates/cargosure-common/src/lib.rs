//! # Cargosure Common
//!
//! Shared types and errors for the Cargosure insurance decision engine.
//!
//! ## Core Types
//!
//! - [`RiskSummary`]: shipment risk analytics supplied by the upstream risk stage
//! - [`InsuranceDecision`]: the actionable recommendation produced by the engine
//! - [`InputError`]: why a risk summary could not be turned into a decision

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{CargosureError, CatalogError, InputError, Result};
pub use types::{
    decision::{
        CoverageIntensity, CoverageType, InsuranceAction, InsuranceDecision,
        ProviderRecommendation,
    },
    risk_summary::{LossMetrics, RiskLevel, RiskSummary, ShipmentProfile},
};

/// Cargosure version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Confidence seed used when the upstream stage reports no uncertainty level
pub const DEFAULT_UNCERTAINTY_LEVEL: f64 = 0.8;

/// Route placeholder emitted by upstream forms when no route was entered
pub const ROUTE_PLACEHOLDER: &str = "Route not specified";
