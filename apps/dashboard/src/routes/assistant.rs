use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agents::require;
use crate::errors::AppError;
use crate::models::search::SearchResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub context: Option<Value>,
}

#[derive(Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub query: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub result: SearchResult,
    /// Newest first.
    pub history: Vec<SearchResult>,
}

/// POST /api/v1/query
/// Natural-language request routed through the root agent.
pub async fn handle_query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<Value>, AppError> {
    require("query", &req.query)?;
    let answer = state
        .root_agent
        .process_query(req.query.trim(), req.context.as_ref())
        .await?;
    Ok(Json(answer))
}

/// POST /api/v1/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<SearchBody>,
) -> Result<Json<SearchResponse>, AppError> {
    let result = state.search.search(&req.query).await?;
    let history = state.search.history().await;
    Ok(Json(SearchResponse { result, history }))
}
