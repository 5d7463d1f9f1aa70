use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http_client::ApiError;

/// The `{success, data, message, error}` wrapper most agent endpoints use.
///
/// Callers must branch on `success` before touching `data`; `into_result`
/// does that branching for them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    /// `Ok(data)` for a successful envelope, `Rejected` otherwise.
    /// `fallback` is used when the service gave no reason.
    pub fn into_result(self, endpoint: &str, fallback: &str) -> Result<T, ApiError> {
        if !self.success {
            let message = self
                .message
                .or(self.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            return Err(ApiError::Rejected { message });
        }
        self.data
            .ok_or_else(|| ApiError::schema(endpoint, "successful response carried no payload"))
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decodes an envelope from a raw response body.
    ///
    /// The payload is read from `data` when that key exists. Several agents
    /// flatten the payload next to `success` instead, so without a `data` key
    /// the whole object is decoded as the payload. A missing `success` flag
    /// is a shape error.
    pub fn from_value(endpoint: &str, value: Value) -> Result<Self, ApiError> {
        let Value::Object(mut map) = value else {
            return Err(ApiError::schema(endpoint, "expected a JSON object envelope"));
        };

        let success = match map.get("success") {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(ApiError::schema(
                    endpoint,
                    format!("`success` must be a boolean, got {other}"),
                ))
            }
            None => return Err(ApiError::schema(endpoint, "missing `success` flag")),
        };
        let message = take_string(&mut map, "message");
        let error = take_string(&mut map, "error");

        if !success {
            return Ok(Self {
                success,
                data: None,
                message,
                error,
            });
        }

        let payload = match map.remove("data") {
            Some(Value::Null) | None => Value::Object(map),
            Some(data) => data,
        };
        let data = serde_json::from_value(payload)
            .map_err(|e| ApiError::schema(endpoint, e.to_string()))?;

        Ok(Self {
            success,
            data: Some(data),
            message,
            error,
        })
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Scheduled {
        interview_id: String,
    }

    #[test]
    fn test_failure_never_exposes_data() {
        let env: ApiResponse<Scheduled> = ApiResponse::from_value(
            "/schedule",
            json!({ "success": false, "message": "slot taken", "interview_id": "x" }),
        )
        .unwrap();
        assert!(env.data.is_none());

        let err = env.into_result("/schedule", "Failed").unwrap_err();
        assert!(matches!(err, ApiError::Rejected { message } if message == "slot taken"));
    }

    #[test]
    fn test_failure_without_reason_uses_fallback() {
        let env: ApiResponse<Scheduled> =
            ApiResponse::from_value("/schedule", json!({ "success": false })).unwrap();
        let err = env
            .into_result("/schedule", "Failed to schedule interview")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Request rejected: Failed to schedule interview"
        );
    }

    #[test]
    fn test_payload_from_data_key() {
        let env: ApiResponse<Scheduled> = ApiResponse::from_value(
            "/schedule",
            json!({ "success": true, "data": { "interview_id": "iv-1" } }),
        )
        .unwrap();
        assert_eq!(
            env.into_result("/schedule", "x").unwrap(),
            Scheduled {
                interview_id: "iv-1".into()
            }
        );
    }

    #[test]
    fn test_payload_flattened_next_to_success() {
        let env: ApiResponse<Scheduled> = ApiResponse::from_value(
            "/schedule",
            json!({ "success": true, "interview_id": "iv-2", "message": "ok" }),
        )
        .unwrap();
        assert_eq!(env.message.as_deref(), Some("ok"));
        assert_eq!(env.into_result("/schedule", "x").unwrap().interview_id, "iv-2");
    }

    #[test]
    fn test_missing_success_is_schema_mismatch() {
        let err = ApiResponse::<Value>::from_value("/generate", json!({ "job_id": "1" }))
            .unwrap_err();
        assert!(matches!(err, ApiError::SchemaMismatch { .. }));

        let err = ApiResponse::<Value>::from_value("/generate", json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::SchemaMismatch { .. }));
    }
}
