//! Envelope handling for BEA responses.
//!
//! Every response is wrapped as `{"BEAAPI": {"Results": {...}}}`. Failed
//! queries carry an `Error` node, normally under `Results` and for some
//! request-level failures directly under `BEAAPI`.

use crate::{Result, error::BeaError, table::records_to_frame};
use polars::prelude::DataFrame;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// The `Results` object of a successful response.
pub type Results = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct ErrorNode {
    #[serde(rename = "APIErrorCode", default)]
    code: Option<Value>,
    #[serde(rename = "APIErrorDescription", default)]
    description: Option<String>,
    #[serde(rename = "AdditionalDetail", default)]
    additional_detail: Option<Value>,
}

/// Fail if the envelope carries an `Error` node.
pub(crate) fn check_for_error(envelope: &Value) -> Result<()> {
    let Some(root) = envelope.get("BEAAPI") else {
        return Ok(());
    };
    let error = root
        .get("Results")
        .and_then(|results| results.get("Error"))
        .filter(|node| !node.is_null())
        .or_else(|| root.get("Error").filter(|node| !node.is_null()));

    match error {
        Some(node) => Err(api_error(node)),
        None => Ok(()),
    }
}

fn api_error(node: &Value) -> BeaError {
    let Ok(parsed) = ErrorNode::deserialize(node) else {
        return BeaError::Api {
            code: None,
            description: node.to_string(),
            detail: None,
        };
    };

    let detail = parsed
        .additional_detail
        .filter(|d| !d.is_null())
        .map(|d| serde_json::to_string_pretty(&d).unwrap_or_else(|_| d.to_string()));
    BeaError::Api {
        code: parsed.code.map(|c| match c {
            Value::String(s) => s,
            other => other.to_string(),
        }),
        description: parsed
            .description
            .unwrap_or_else(|| "no description provided".to_string()),
        detail,
    }
}

/// Take the `Results` object out of a decoded envelope.
pub(crate) fn into_results(envelope: Value) -> Result<Results> {
    let results = match envelope {
        Value::Object(mut root) => match root.remove("BEAAPI") {
            Some(Value::Object(mut api)) => api.remove("Results"),
            _ => None,
        },
        _ => None,
    };

    match results {
        Some(Value::Object(results)) => Ok(results),
        _ => Err(BeaError::UnexpectedShape(
            "response has no `BEAAPI.Results` object".to_string(),
        )),
    }
}

/// Convert a node that must be present.
pub(crate) fn required_table(results: &Results, node: &str) -> Result<DataFrame> {
    let Some(value) = results.get(node) else {
        dump_payload(results);
        return Err(BeaError::UnexpectedShape(format!(
            "missing node `{node}` in results"
        )));
    };
    node_table(results, node, value)
}

/// Convert a node that may be absent; absence yields an empty table.
pub(crate) fn optional_table(results: &Results, node: &str) -> Result<DataFrame> {
    match results.get(node) {
        Some(Value::Null) | None => Ok(DataFrame::empty()),
        Some(value) => node_table(results, node, value),
    }
}

fn node_table(results: &Results, node: &str, value: &Value) -> Result<DataFrame> {
    let df = records_to_frame(node, value).inspect_err(|_| dump_payload(results))?;
    debug!(node, rows = df.height(), columns = df.width(), "converted result node");
    Ok(df)
}

fn dump_payload(results: &Results) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let payload = serde_json::to_string_pretty(results).unwrap_or_default();
        debug!(%payload, "unexpected BEA response shape");
    }
}
