//! Provider request builder
//!
//! Applies a provider's parameter table to canonical request parameters

use crate::models::canonical::ChatCompletionParams;
use crate::providers::{ParameterSpec, ParameterTable};
use crate::utils::error::{AdapterError, AdapterResult};
use crate::utils::logging::create_request_log_summary;
use serde_json::{Map, Value};
use tracing::debug;

/// Build the provider request body.
///
/// Table entries are applied in declaration order, so aliases mapping onto the
/// same provider field are resolved last-wins. Canonical fields without a spec
/// are not forwarded. Defaults are only filled for required parameters.
pub fn build_request_body(
    table: &ParameterTable,
    params: &ChatCompletionParams,
) -> AdapterResult<Map<String, Value>> {
    let canonical = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        _ => return Err(AdapterError::Internal("canonical params must serialize to an object".to_string())),
    };

    let mut body = Map::new();
    for (name, spec) in table.iter() {
        match canonical.get(name).filter(|value| !value.is_null()) {
            Some(value) => {
                let value = match spec.transform {
                    Some(transform) => transform(params)?,
                    None => value.clone(),
                };
                body.insert(spec.param.to_string(), clamp(value, spec));
            }
            None if spec.required => {
                let default = spec.default.clone().ok_or_else(|| {
                    AdapterError::Validation(format!("missing required parameter: {}", name))
                })?;
                body.insert(spec.param.to_string(), default);
            }
            None => {}
        }
    }

    for name in canonical.keys().filter(|name| table.get(name).is_none()) {
        debug!("Dropping unsupported parameter: {}", name);
    }

    debug!("Provider request body: {}", create_request_log_summary(&body));
    Ok(body)
}

/// Clamp a numeric value into the spec's bounds; other values pass through
fn clamp(value: Value, spec: &ParameterSpec) -> Value {
    let Some(number) = value.as_f64() else {
        return value;
    };

    let mut clamped = number;
    if let Some(min) = spec.min {
        clamped = clamped.max(min);
    }
    if let Some(max) = spec.max {
        clamped = clamped.min(max);
    }

    if clamped == number {
        return value;
    }

    if (value.is_i64() || value.is_u64()) && clamped.fract() == 0.0 {
        Value::from(clamped as i64)
    } else {
        Value::from(clamped)
    }
}
