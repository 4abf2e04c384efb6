//! Provider catalog
//!
//! The candidate providers are data, not code: a catalog can be loaded from a
//! TOML/JSON/YAML file and substituted in tests. The built-in catalog keeps the
//! four long-standing candidates in their fixed order, which also decides ties.

use cargosure_common::{CargosureError, CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Environment prefix for catalog overrides, e.g. `CARGOSURE_CATALOG__...`
pub const CATALOG_ENV_PREFIX: &str = "CARGOSURE_CATALOG";

/// One insurance provider candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub name: String,
    /// Upper-case route tokens the provider specializes in; empty for a
    /// generalist
    #[serde(default)]
    pub route_keywords: Vec<String>,
    /// Specializes in electronics, fragile or other high-value cargo
    #[serde(default)]
    pub high_value_specialist: bool,
    /// Financial stability before the risk-tier adjustment (0-1)
    pub base_stability: f64,
}

impl ProviderProfile {
    pub fn new(name: impl Into<String>, base_stability: f64) -> Self {
        Self {
            name: name.into(),
            route_keywords: Vec::new(),
            high_value_specialist: false,
            base_stability,
        }
    }

    /// Set the route tokens
    pub fn with_route_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.route_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as high-value cargo specialist
    pub fn high_value_specialist(mut self) -> Self {
        self.high_value_specialist = true;
        self
    }

    /// No regional specialization
    pub fn is_generalist(&self) -> bool {
        self.route_keywords.is_empty()
    }

    /// Whether an upper-cased route mentions any of this provider's tokens
    pub fn serves_route(&self, route_upper: &str) -> bool {
        self.route_keywords
            .iter()
            .any(|keyword| route_upper.contains(&keyword.to_ascii_uppercase()))
    }
}

/// Ordered set of provider candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCatalog {
    pub providers: Vec<ProviderProfile>,
    /// Cargo description tokens that mark high-value cargo
    #[serde(default = "default_high_value_cargo_keywords")]
    pub high_value_cargo_keywords: Vec<String>,
}

fn default_high_value_cargo_keywords() -> Vec<String> {
    ["ELECTRONIC", "FRAGILE", "HIGH-VALUE", "HIGH VALUE"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ProviderCatalog {
    fn default() -> Self {
        Self {
            providers: vec![
                ProviderProfile::new("Asia-Pacific Specialized", 0.75)
                    .with_route_keywords([
                        "ASIA",
                        "CHINA",
                        "SHANGHAI",
                        "SHENZHEN",
                        "NINGBO",
                        "HONG KONG",
                        "SINGAPORE",
                        "BUSAN",
                        "TOKYO",
                    ])
                    .high_value_specialist(),
                ProviderProfile::new("European Trade Provider", 0.80).with_route_keywords([
                    "EUROPE",
                    "ROTTERDAM",
                    "HAMBURG",
                    "ANTWERP",
                    "FELIXSTOWE",
                    "LE HAVRE",
                ]),
                ProviderProfile::new("Trans-Pacific Provider", 0.70)
                    .with_route_keywords([
                        "AMERICA",
                        "US",
                        "USA",
                        "LOS ANGELES",
                        "LONG BEACH",
                        "SEATTLE",
                        "VANCOUVER",
                    ])
                    .high_value_specialist(),
                ProviderProfile::new("Standard Provider", 0.65),
            ],
            high_value_cargo_keywords: default_high_value_cargo_keywords(),
        }
    }
}

impl ProviderCatalog {
    /// Build and validate a catalog
    pub fn new(providers: Vec<ProviderProfile>) -> Result<Self> {
        let catalog = Self {
            providers,
            high_value_cargo_keywords: default_high_value_cargo_keywords(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Replace the high-value cargo tokens
    pub fn with_high_value_cargo_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.high_value_cargo_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Load a catalog file, overlaid with `CARGOSURE_CATALOG__*` variables
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(CATALOG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| {
                CargosureError::Config(format!(
                    "Failed to read catalog {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let catalog: Self = settings.try_deserialize().map_err(|e| {
            CargosureError::Config(format!("Failed to parse catalog {}: {}", path.display(), e))
        })?;
        catalog.validate()?;

        debug!(
            path = %path.display(),
            providers = catalog.providers.len(),
            "Loaded provider catalog"
        );
        Ok(catalog)
    }

    /// Reject catalogs the scorer cannot work with
    pub fn validate(&self) -> std::result::Result<(), CatalogError> {
        if self.providers.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for (position, provider) in self.providers.iter().enumerate() {
            if provider.name.trim().is_empty() {
                return Err(CatalogError::BlankName(position));
            }
            if !seen.insert(provider.name.as_str()) {
                return Err(CatalogError::DuplicateProvider(provider.name.clone()));
            }
            if !(0.0..=1.0).contains(&provider.base_stability) {
                return Err(CatalogError::InvalidStability {
                    name: provider.name.clone(),
                    value: provider.base_stability,
                });
            }
        }
        Ok(())
    }

    /// Whether a cargo description mentions high-value goods
    pub fn is_high_value_cargo(&self, cargo: &str) -> bool {
        let cargo = cargo.to_ascii_uppercase();
        self.high_value_cargo_keywords
            .iter()
            .any(|keyword| cargo.contains(&keyword.to_ascii_uppercase()))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog_order() {
        let catalog = ProviderCatalog::default();
        let names: Vec<&str> = catalog.providers.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Asia-Pacific Specialized",
                "European Trade Provider",
                "Trans-Pacific Provider",
                "Standard Provider",
            ]
        );
        assert!(catalog.validate().is_ok());
        assert!(catalog.providers[3].is_generalist());
    }

    #[test]
    fn test_route_and_cargo_matching() {
        let catalog = ProviderCatalog::default();
        assert!(catalog.providers[0].serves_route("SHANGHAI TO ROTTERDAM"));
        assert!(catalog.providers[1].serves_route("SHANGHAI TO ROTTERDAM"));
        assert!(!catalog.providers[3].serves_route("SHANGHAI TO ROTTERDAM"));

        assert!(catalog.is_high_value_cargo("Consumer electronics"));
        assert!(catalog.is_high_value_cargo("fragile glassware"));
        assert!(!catalog.is_high_value_cargo("Bulk grain"));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            ProviderCatalog::new(vec![]),
            Err(CargosureError::Catalog(CatalogError::Empty))
        ));

        let blank = ProviderCatalog::new(vec![ProviderProfile::new("  ", 0.7)]);
        assert!(matches!(
            blank,
            Err(CargosureError::Catalog(CatalogError::BlankName(0)))
        ));

        let duplicate = ProviderCatalog::new(vec![
            ProviderProfile::new("Lloyd", 0.7),
            ProviderProfile::new("Lloyd", 0.8),
        ]);
        assert!(matches!(
            duplicate,
            Err(CargosureError::Catalog(CatalogError::DuplicateProvider(ref name))) if name == "Lloyd"
        ));

        let unstable = ProviderCatalog::new(vec![ProviderProfile::new("Lloyd", 1.2)]);
        assert!(matches!(
            unstable,
            Err(CargosureError::Catalog(CatalogError::InvalidStability { .. }))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
high_value_cargo_keywords = ["PHARMA"]

[[providers]]
name = "Nordic Mutual"
route_keywords = ["OSLO", "GOTHENBURG"]
base_stability = 0.85

[[providers]]
name = "Any Cargo Co"
base_stability = 0.6
"#
        )
        .unwrap();

        let catalog = ProviderCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.providers[0].name, "Nordic Mutual");
        assert!(!catalog.providers[0].high_value_specialist);
        assert!(catalog.providers[1].is_generalist());
        assert!(catalog.is_high_value_cargo("pharma samples"));
    }

    #[test]
    fn test_from_missing_file() {
        let err = ProviderCatalog::from_file("/nonexistent/catalog.toml").unwrap_err();
        assert!(matches!(err, CargosureError::Config(_)));
    }
}
