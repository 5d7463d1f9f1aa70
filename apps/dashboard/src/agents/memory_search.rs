use std::sync::Arc;

use crate::http_client::{decode, ApiError, CredentialProvider, ServiceHttpClient};
use crate::models::search::{SearchRequest, SearchResult};

/// User id the dashboard searches on behalf of.
pub const WEB_USER_ID: &str = "web_user";

/// Client for the free-text memory-search service.
#[derive(Clone)]
pub struct MemorySearchClient {
    http: ServiceHttpClient,
}

impl MemorySearchClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            http: ServiceHttpClient::new("memory_search", base_url, credentials)?,
        })
    }

    pub async fn search(&self, query: &str, user_id: &str) -> Result<SearchResult, ApiError> {
        let value = self
            .http
            .post(
                "/search",
                &SearchRequest {
                    query: query.to_string(),
                    user_id: user_id.to_string(),
                },
            )
            .await?;
        decode("/search", value)
    }
}
