//! Output rendering
//!
//! Every input record gets one slot: the decision JSON, or an
//! "analysis pending" marker when the record could not be decided.

use cargosure_common::Result;
use cargosure_engine::InsuranceDecisionEngine;
use serde_json::{json, Value};
use tracing::{info, warn};

pub const PENDING_STATUS: &str = "analysis_pending";

/// Decide one record into its output slot
pub fn render_record(engine: &InsuranceDecisionEngine, record: &Value) -> Result<Value> {
    match engine.try_evaluate(record) {
        Ok(decision) => {
            info!(
                action = %decision.action,
                coverage = %decision.coverage_type,
                provider = %decision.recommended_provider.name,
                confidence = decision.confidence,
                "Decision ready"
            );
            Ok(serde_json::to_value(decision)?)
        }
        Err(err) => {
            warn!(error = %err, "Decision unavailable");
            Ok(json!({"status": PENDING_STATUS, "reason": err.to_string()}))
        }
    }
}

/// Decide a record or an array of records
pub fn render(engine: &InsuranceDecisionEngine, input: &Value) -> Result<Value> {
    match input {
        Value::Array(records) => records
            .iter()
            .map(|record| render_record(engine, record))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        record => render_record(engine, record),
    }
}
