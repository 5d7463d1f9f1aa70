use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::http_client::ApiError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream rejected the request: {0}")]
    UpstreamRejected(String),

    #[error("Upstream timed out: {0}")]
    UpstreamTimeout(String),

    #[error("Service unreachable: {0}")]
    ServiceUnreachable(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(msg) => AppError::Validation(msg),
            ApiError::Rejected { message } => AppError::UpstreamRejected(message),
            e @ ApiError::Timeout { .. } => AppError::UpstreamTimeout(e.to_string()),
            e @ ApiError::Transport { .. } => AppError::ServiceUnreachable(e.to_string()),
            e @ ApiError::Status { .. } => AppError::Upstream(e.to_string()),
            e @ ApiError::SchemaMismatch { .. } => AppError::SchemaMismatch(e.to_string()),
            ApiError::Io(e) => AppError::Internal(e.into()),
            e @ ApiError::TaskFailed(_) => AppError::Internal(anyhow::anyhow!(e.to_string())),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UpstreamRejected(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UPSTREAM_REJECTED",
                msg.clone(),
            ),
            AppError::UpstreamTimeout(msg) => {
                tracing::warn!("Upstream timeout: {msg}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "UPSTREAM_TIMEOUT",
                    "The service is taking longer than expected. Please try again.".to_string(),
                )
            }
            AppError::ServiceUnreachable(msg) => {
                tracing::warn!("Service unreachable: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SERVICE_UNREACHABLE",
                    msg.clone(),
                )
            }
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg.clone()),
            AppError::SchemaMismatch(msg) => {
                tracing::error!("Schema mismatch: {msg}");
                (StatusCode::BAD_GATEWAY, "SCHEMA_MISMATCH", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_upstream_errors_map_to_statuses() {
        let cases = [
            (
                ApiError::Validation("query is required".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Rejected {
                    message: "slot taken".into(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Timeout {
                    url: "http://x/health".into(),
                },
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ApiError::Status {
                    status: 500,
                    message: "boom".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::schema("/templates", "missing `templates` list"),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::TaskFailed("task panicked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(status_of(err), expected);
        }
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::from(ApiError::Rejected {
            message: "slot taken".into(),
        })
        .into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "UPSTREAM_REJECTED");
        assert_eq!(body["error"]["message"], "slot taken");
    }
}
