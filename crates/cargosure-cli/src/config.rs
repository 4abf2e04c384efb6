//! CLI configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Command-line front end settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Provider catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl CliConfig {
    /// Load configuration from `.env` and `CARGOSURE_*` variables
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(path) = lookup("CARGOSURE_CATALOG_PATH") {
            if !path.trim().is_empty() {
                cfg.catalog_path = Some(path);
            }
        }
        if let Some(val) = lookup("CARGOSURE_PRETTY") {
            cfg.pretty = val
                .trim()
                .parse()
                .with_context(|| format!("CARGOSURE_PRETTY must be true or false, got {val:?}"))?;
        }

        Ok(cfg)
    }
}
