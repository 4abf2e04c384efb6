//! Error types for Cargosure
//!
//! The engine itself is pure; the only failures are malformed input records
//! and invalid provider catalogs.

use thiserror::Error;

/// Result type alias using CargosureError
pub type Result<T> = std::result::Result<T, CargosureError>;

/// Unified error type for Cargosure operations
#[derive(Debug, Error)]
pub enum CargosureError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Reasons a risk summary is rejected at the boundary.
///
/// Callers should render these as "decision unavailable", never as a failure
/// that needs rollback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("risk summary must be a JSON object")]
    NotARecord,

    #[error("finalRiskScore is missing")]
    MissingRiskScore,

    #[error("finalRiskScore is not a number: {0}")]
    InvalidRiskScore(String),

    #[error("riskLevel is missing")]
    MissingRiskLevel,

    #[error("riskLevel must be a string")]
    InvalidRiskLevel,
}

/// Provider catalog validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("provider catalog is empty")]
    Empty,

    #[error("provider at position {0} has a blank name")]
    BlankName(usize),

    #[error("duplicate provider: {0}")]
    DuplicateProvider(String),

    #[error("provider {name} has base stability {value} outside [0, 1]")]
    InvalidStability { name: String, value: f64 },
}

impl From<serde_json::Error> for CargosureError {
    fn from(err: serde_json::Error) -> Self {
        CargosureError::Serialization(err.to_string())
    }
}
