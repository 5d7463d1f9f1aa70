//! Service HTTP client: the single point of entry for every outbound call to
//! an agent service.
//!
//! One `ServiceHttpClient` is bound to one base URL. It applies the fixed
//! request timeout, JSON content type and bearer token, and turns every
//! failure into an `ApiError`. Nothing is retried; errors surface to the
//! caller as-is.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

pub mod credentials;

pub use credentials::{CredentialProvider, NoCredentials, StaticToken, TokenFile};

/// Fixed per-request timeout for every agent call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query-string parameters for list endpoints.
pub type Query = std::collections::BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Could not reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response shape from {endpoint}: {detail}")]
    SchemaMismatch { endpoint: String, detail: String },

    #[error("Request rejected: {message}")]
    Rejected { message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Call did not complete: {0}")]
    TaskFailed(String),
}

impl ApiError {
    pub fn schema(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::SchemaMismatch {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    /// HTTP status of the upstream response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[allow(dead_code)]
    /// True when the service could not be reached at all, as opposed to
    /// answering with an error.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Timeout { .. } | ApiError::Transport { .. })
    }

    /// Human-readable text for view state and notifications.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout { .. } => {
                "Request timed out. The service is taking longer than expected. Please try again."
                    .to_string()
            }
            ApiError::Status { status: 422, .. } => {
                "Invalid data format. Please check your input fields.".to_string()
            }
            ApiError::Status { status, .. } if *status >= 500 => {
                "Server error. Please try again later.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Thin wrapper over `reqwest::Client` bound to one agent service.
#[derive(Clone)]
pub struct ServiceHttpClient {
    service: &'static str,
    base_url: String,
    client: Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl ServiceHttpClient {
    pub fn new(
        service: &'static str,
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        Self::with_timeout(service, base_url, credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        service: &'static str,
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            service,
            base_url,
            client,
            credentials,
        })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(Method::GET, path, |b| b).await
    }

    pub async fn get_with_query<Q>(&self, path: &str, query: &Q) -> Result<Value, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        self.execute(Method::GET, path, |b| b.query(query)).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, |b| b.json(body)).await
    }

    /// POST without a request body (action endpoints such as `/memory/clear`).
    pub async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(Method::POST, path, |b| b).await
    }

    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, |b| b.json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(Method::DELETE, path, |b| b).await
    }

    /// Multipart upload. The form sets its own `multipart/form-data`
    /// content type, replacing the JSON default.
    pub async fn upload(&self, path: &str, form: Form) -> Result<Value, ApiError> {
        self.execute(Method::POST, path, |b| b.multipart(form)).await
    }

    /// Issues a GET and only checks the status line; the body is ignored.
    /// Used by liveness probes whose bodies are not contractually JSON.
    pub async fn probe(&self, path: &str) -> Result<u16, ApiError> {
        let url = self.url(path);
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| self.log_failure(&Method::GET, &url, transport_error(&url, e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.log_failure(
                &Method::GET,
                &url,
                ApiError::Status {
                    status: status.as_u16(),
                    message: extract_error_message(&body),
                },
            ))
        }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn execute<F>(&self, method: Method, path: &str, build: F) -> Result<Value, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path);
        let builder = build(self.authorize(self.client.request(method.clone(), &url)));

        debug!("{} {} {}", self.service, method, url);

        let response = builder
            .send()
            .await
            .map_err(|e| self.log_failure(&method, &url, transport_error(&url, e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.log_failure(&method, &url, transport_error(&url, e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            return Err(self.log_failure(
                &method,
                &url,
                ApiError::Status {
                    status: status.as_u16(),
                    message: extract_error_message(&text),
                },
            ));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| {
            self.log_failure(
                &method,
                &url,
                ApiError::schema(url.as_str(), format!("body is not JSON: {e}")),
            )
        })
    }

    fn log_failure(&self, method: &Method, url: &str, err: ApiError) -> ApiError {
        error!(
            service = self.service,
            method = %method,
            url = %url,
            "API error: {err}"
        );
        err
    }
}

/// Decodes a JSON value into a typed record, reporting shape errors as
/// `SchemaMismatch` against `endpoint`.
pub fn decode<R: DeserializeOwned>(endpoint: &str, value: Value) -> Result<R, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::schema(endpoint, e.to_string()))
}

fn transport_error(url: &str, source: reqwest::Error) -> ApiError {
    if source.is_timeout() {
        ApiError::Timeout {
            url: url.to_string(),
        }
    } else {
        ApiError::Transport {
            url: url.to_string(),
            source,
        }
    }
}

/// Pulls a readable message out of an error body. FastAPI-style services put
/// it under `detail`, others under `message` or `error`.
fn extract_error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "Unknown error".to_string();
    }

    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) else {
        return trimmed.to_string();
    };

    ["detail", "message", "error"]
        .iter()
        .find_map(|key| match map.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
        .unwrap_or_else(|| trimmed.to_string())
}
