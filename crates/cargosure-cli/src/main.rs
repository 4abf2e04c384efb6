//! Cargosure CLI
//!
//! Reads a risk summary (or an array of them) as JSON from a file or stdin and
//! prints the insurance decision(s) as JSON on stdout. Logs go to stderr.
//!
//! ```text
//! cargosure [FILE | -]
//! ```

mod config;
mod report;

use std::io::Read;

use anyhow::{Context, Result};
use cargosure_engine::{InsuranceDecisionEngine, ProviderCatalog};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::CliConfig;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::load()?;
    info!("Starting Cargosure v{}", cargosure_common::VERSION);

    let engine = match config.catalog_path.as_deref() {
        Some(path) => {
            let catalog = ProviderCatalog::from_file(path)?;
            info!(path, providers = catalog.len(), "Using provider catalog");
            InsuranceDecisionEngine::with_catalog(catalog)?
        }
        None => InsuranceDecisionEngine::new(),
    };

    let source = std::env::args().nth(1);
    let raw = read_input(source.as_deref())?;
    let input: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;

    let output = report::render(&engine, &input)?;
    let rendered = if config.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}

/// Read from a file path, or stdin when absent or `-`
fn read_input(source: Option<&str>) -> Result<String> {
    match source {
        Some(path) if path != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path)),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
