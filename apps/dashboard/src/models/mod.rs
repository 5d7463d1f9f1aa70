//! View-model records rebuilt from agent JSON.
//!
//! Every record is parsed at the client boundary. Structural problems (wrong
//! container, missing identifiers, mistyped fields) fail with
//! `ApiError::SchemaMismatch`; optional display fields default to empty.

pub mod envelope;
pub mod health;
pub mod interview;
pub mod job_brief;
pub mod job_description;
pub mod resume;
pub mod search;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http_client::{decode, ApiError};

pub use envelope::ApiResponse;
pub use health::{
    AgentLiveness, AgentStatus, HealthStatus, OverallHealth, ServiceConfigs, ServiceHealthReport,
};

/// Where a list lives inside a response body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListShape {
    /// Key of the wrapped form, e.g. `{"templates": [...]}`.
    pub key: &'static str,
    /// Whether a bare top-level array is also accepted.
    pub allow_bare: bool,
    /// Whether an object without `key` means "no items".
    pub missing_is_empty: bool,
}

/// Decodes a list of records from either accepted container shape.
pub(crate) fn decode_list<T: DeserializeOwned>(
    endpoint: &str,
    value: Value,
    shape: ListShape,
) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Array(items) if shape.allow_bare => items,
        Value::Object(mut map) => match map.remove(shape.key) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None if shape.missing_is_empty => Vec::new(),
            Some(other) => {
                return Err(ApiError::schema(
                    endpoint,
                    format!("`{}` must be an array, got {}", shape.key, kind(&other)),
                ))
            }
            None => {
                return Err(ApiError::schema(
                    endpoint,
                    format!("missing `{}` list", shape.key),
                ))
            }
        },
        other => {
            return Err(ApiError::schema(
                endpoint,
                format!("expected a list container, got {}", kind(&other)),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| decode(endpoint, item).map_err(|e| at_index(e, i)))
        .collect()
}

fn at_index(err: ApiError, index: usize) -> ApiError {
    match err {
        ApiError::SchemaMismatch { endpoint, detail } => ApiError::SchemaMismatch {
            endpoint,
            detail: format!("item {index}: {detail}"),
        },
        other => other,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
