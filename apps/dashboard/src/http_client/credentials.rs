//! Bearer-token sources for outbound agent calls.
//!
//! The HTTP wrapper never reads tokens from ambient state. A provider is
//! handed to every `ServiceHttpClient` at construction and consulted once per
//! request.

use std::path::PathBuf;

use tracing::warn;

/// Supplies the bearer token attached to outbound requests, if any.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// No `Authorization` header is ever sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// A token fixed at startup (e.g. from `AUTH_TOKEN`).
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        let token = self.0.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}

/// A persisted token file, re-read on every request so a login flow can
/// rotate it without restarting the dashboard.
///
/// Missing or blank file → no token.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialProvider for TokenFile {
    fn bearer_token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read token file {}: {e}", self.path.display());
                None
            }
        }
    }
}
