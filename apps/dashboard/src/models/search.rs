use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Answer returned by the memory-search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub answer: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<String>,
    #[serde(default)]
    pub sources_count: u32,
    #[serde(default)]
    pub related_topics: Vec<String>,
    #[serde(default)]
    pub timestamp: String,
}

impl SearchResult {
    /// The apology card shown in place of an answer when the search fails.
    pub fn failed() -> Self {
        Self {
            answer: "Sorry, I encountered an error while searching. Please try again.".to_string(),
            source: "error".to_string(),
            confidence: 0.0,
            category: "error".to_string(),
            memory_type: None,
            sources_count: 0,
            related_topics: Vec::new(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    #[allow(dead_code)]
    pub fn is_error(&self) -> bool {
        self.source == "error"
    }
}

/// Body of `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub user_id: String,
}
