use std::collections::VecDeque;

use tokio::sync::Mutex;
use tracing::warn;

use crate::agents::memory_search::WEB_USER_ID;
use crate::agents::{require, MemorySearchClient};
use crate::http_client::ApiError;
use crate::models::search::SearchResult;

/// Number of past answers the search box keeps.
pub const HISTORY_LIMIT: usize = 5;

/// Free-text memory search with a short answer history.
pub struct SearchPanel {
    client: MemorySearchClient,
    history: Mutex<VecDeque<SearchResult>>,
}

impl SearchPanel {
    pub fn new(client: MemorySearchClient) -> Self {
        Self {
            client,
            history: Mutex::new(VecDeque::with_capacity(HISTORY_LIMIT)),
        }
    }

    /// Asks the memory service. A blank query is rejected before any request.
    /// A failed search still answers, with the apology card, but only real
    /// answers enter the history.
    pub async fn search(&self, query: &str) -> Result<SearchResult, ApiError> {
        require("query", query)?;

        let result = match self.client.search(query.trim(), WEB_USER_ID).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Memory search failed: {e}");
                return Ok(SearchResult::failed());
            }
        };

        let mut history = self.history.lock().await;
        history.push_front(result.clone());
        history.truncate(HISTORY_LIMIT);
        Ok(result)
    }

    /// Newest first.
    pub async fn history(&self) -> Vec<SearchResult> {
        self.history.lock().await.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_support::{dead_url, spawn_stub};
    use crate::http_client::NoCredentials;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn echo_panel() -> SearchPanel {
        let router = Router::new().route(
            "/search",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "answer": body["query"], "source": "memory" }))
            }),
        );
        let base = spawn_stub(router).await;
        SearchPanel::new(MemorySearchClient::new(base, Arc::new(NoCredentials)).unwrap())
    }

    #[tokio::test]
    async fn test_history_keeps_last_five_newest_first() {
        let panel = echo_panel().await;
        for i in 0..7 {
            panel.search(&format!("q{i}")).await.unwrap();
        }

        let answers: Vec<String> = panel
            .history()
            .await
            .into_iter()
            .map(|r| r.answer)
            .collect();
        assert_eq!(answers, vec!["q6", "q5", "q4", "q3", "q2"]);
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let panel = echo_panel().await;
        let err = panel.search("   ").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(panel.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_service_yields_apology_card() {
        let client = MemorySearchClient::new(dead_url().await, Arc::new(NoCredentials)).unwrap();
        let panel = SearchPanel::new(client);

        let result = panel.search("who is hiring?").await.unwrap();
        assert!(result.is_error());
        assert_eq!(result.confidence, 0.0);
        assert!(panel.history().await.is_empty());
    }
}
