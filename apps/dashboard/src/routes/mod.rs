pub mod assistant;
pub mod health;
pub mod people;
pub mod system;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Overview and system
        .route("/api/v1/overview", get(system::handle_overview))
        .route(
            "/api/v1/overview/refresh",
            post(system::handle_overview_refresh),
        )
        .route("/api/v1/system/health", get(system::handle_system_health))
        .route("/api/v1/system/configs", get(system::handle_system_configs))
        .route("/api/v1/system/state", get(system::handle_system_state))
        // Assistant
        .route("/api/v1/query", post(assistant::handle_query))
        .route("/api/v1/search", post(assistant::handle_search))
        // People
        .route("/api/v1/people/stats", get(people::handle_people_stats))
        .route("/api/v1/jd", get(people::handle_list_job_descriptions))
        .route("/api/v1/jd/templates", get(people::handle_list_templates))
        .route(
            "/api/v1/jd/generate",
            post(people::handle_generate_job_description),
        )
        .route(
            "/api/v1/jd/create",
            post(people::handle_create_job_description),
        )
        .route(
            "/api/v1/jd/upload",
            post(people::handle_upload_job_description),
        )
        .route(
            "/api/v1/resume/history",
            get(people::handle_analysis_history),
        )
        .route(
            "/api/v1/resume/analyze",
            post(people::handle_analyze_resume),
        )
        .route("/api/v1/interviews", get(people::handle_interview_board))
        .route(
            "/api/v1/interviews/schedule",
            post(people::handle_schedule_interview),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::facade::HrPhoenixApi;
    use crate::http_client::test_support::{dead_url, spawn_stub};
    use crate::http_client::NoCredentials;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Json;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// One stub standing in for every agent.
    fn agent_stub() -> Router {
        Router::new()
            .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }))
            .route("/config", get(|| async { Json(json!({ "model": "stub" })) }))
            .route("/templates", get(|| async { Json(json!({ "templates": [] })) }))
            .route(
                "/templates/email",
                get(|| async { Json(json!({ "templates": [] })) }),
            )
            .route(
                "/generate",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "success": true,
                        "job_description": body["job_details"]["job_title"],
                        "job_id": "jd_42"
                    }))
                }),
            )
            .route(
                "/schedule",
                post(|| async {
                    Json(json!({ "success": false, "message": "Interviewer unavailable" }))
                }),
            )
            .route(
                "/process-query",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({ "echo": body["query_text"] }))
                }),
            )
            .route(
                "/search",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({ "answer": body["query"], "source": "memory" }))
                }),
            )
    }

    /// Every agent on the stub except those named in `dead`.
    async fn app(dead: &[&str]) -> Router {
        let live = spawn_stub(agent_stub()).await;
        let down = dead_url().await;
        let vars: HashMap<String, String> = [
            "ROOT_AGENT_URL",
            "JD_GENERATOR_URL",
            "RESUME_ANALYZER_URL",
            "INTERVIEW_SCHEDULER_URL",
            "MEMORY_SEARCH_URL",
        ]
        .into_iter()
        .map(|key| {
            let url = if dead.contains(&key) { &down } else { &live };
            (key.to_string(), url.clone())
        })
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
        let api = HrPhoenixApi::from_config(&config, Arc::new(NoCredentials)).unwrap();
        build_router(AppState::new(&config, &api).unwrap())
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(app(&[]).await, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_system_health_degrades_with_dead_agent() {
        let (status, body) = call(
            app(&["ROOT_AGENT_URL"]).await,
            "GET",
            "/api/v1/system/health",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "root_agent": "unhealthy",
                "jd_generator": "healthy",
                "resume_analyzer": "healthy",
                "interview_scheduler": "healthy",
                "overall": "degraded"
            })
        );
    }

    #[tokio::test]
    async fn test_system_configs_null_for_dead_agent() {
        let (status, body) = call(
            app(&["RESUME_ANALYZER_URL"]).await,
            "GET",
            "/api/v1/system/configs",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["root_agent"], json!({ "model": "stub" }));
        assert_eq!(body["resume_analyzer"], Value::Null);
    }

    #[tokio::test]
    async fn test_overview_lists_every_agent() {
        let (status, body) = call(
            app(&["INTERVIEW_SCHEDULER_URL"]).await,
            "GET",
            "/api/v1/overview",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_loading"], false);
        let agents = body["data"]["agents"].as_array().unwrap();
        assert_eq!(agents.len(), 4);
        assert_eq!(agents[0]["status"], "online");
        assert_eq!(agents[3]["status"], "offline");
        assert_eq!(body["data"]["graph"]["source"], "placeholder");
    }

    #[tokio::test]
    async fn test_generate_without_title_is_validation_error() {
        let (status, body) = call(
            app(&[]).await,
            "POST",
            "/api/v1/jd/generate",
            Some(json!({ "company_name": "Acme" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "job_title is required");
    }

    #[tokio::test]
    async fn test_create_from_text_generates() {
        let (status, body) = call(
            app(&[]).await,
            "POST",
            "/api/v1/jd/create",
            Some(json!({ "text": "Warehouse Lead, company: Acme, 3 years" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_description"], "Warehouse Lead");
        assert_eq!(body["job_id"], "jd_42");

        let (status, body) = call(
            app(&[]).await,
            "POST",
            "/api/v1/jd/create",
            Some(json!({ "text": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "text is required");
    }

    #[tokio::test]
    async fn test_empty_templates_are_an_empty_list() {
        let (status, body) = call(app(&[]).await, "GET", "/api/v1/jd/templates", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_rejected_schedule_is_422() {
        let (status, body) = call(
            app(&[]).await,
            "POST",
            "/api/v1/interviews/schedule",
            Some(json!({
                "candidate_name": "Jane Smith",
                "candidate_email": "jane@example.com",
                "interview_date": "2024-03-01",
                "interview_time": "09:30"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UPSTREAM_REJECTED");
        assert_eq!(body["error"]["message"], "Interviewer unavailable");
    }

    #[tokio::test]
    async fn test_unreachable_agent_is_502() {
        let (status, body) = call(
            app(&["JD_GENERATOR_URL"]).await,
            "GET",
            "/api/v1/people/stats",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "SERVICE_UNREACHABLE");
    }

    #[tokio::test]
    async fn test_query_forwards_to_root_agent() {
        let (status, body) = call(
            app(&[]).await,
            "POST",
            "/api/v1/query",
            Some(json!({ "query": "  open roles?  " })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["echo"], "open roles?");

        let (status, _) = call(app(&[]).await, "POST", "/api/v1/query", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_returns_result_and_history() {
        let (status, body) = call(
            app(&[]).await,
            "POST",
            "/api/v1/search",
            Some(json!({ "query": "benefits policy" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["answer"], "benefits policy");
        assert_eq!(body["history"].as_array().unwrap().len(), 1);
    }
}
