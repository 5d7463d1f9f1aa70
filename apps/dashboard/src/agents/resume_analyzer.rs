use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::Form;
use serde::Serialize;
use serde_json::Value;

use crate::agents::{AgentService, ServiceName, UploadFile};
use crate::http_client::{ApiError, CredentialProvider, Query, ServiceHttpClient};

pub const DEFAULT_SIMILAR_LIMIT: u32 = 10;
pub const DEFAULT_SIMILAR_THRESHOLD: f64 = 0.7;
pub const DEFAULT_SKILLS_LIMIT: u32 = 20;
pub const DEFAULT_SKILLS_MIN_SCORE: f64 = 0.6;
pub const DEFAULT_EVENTS_LIMIT: u32 = 20;

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    resume_data: &'a Value,
    job_description_data: &'a Value,
}

#[derive(Debug, Serialize)]
struct SimilarSearchRequest<'a> {
    query: &'a str,
    limit: u32,
    threshold: f64,
}

#[derive(Debug, Serialize)]
struct SkillsSearchRequest<'a> {
    skills: &'a [String],
    limit: u32,
    min_score: f64,
}

/// Client for the resume analyzer agent.
#[derive(Clone)]
pub struct ResumeAnalyzerClient {
    http: ServiceHttpClient,
}

impl ResumeAnalyzerClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        Ok(Self::from_http(ServiceHttpClient::new(
            ServiceName::ResumeAnalyzer.as_str(),
            base_url,
            credentials,
        )?))
    }

    pub fn from_http(http: ServiceHttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &ServiceHttpClient {
        &self.http
    }

    pub async fn get_health(&self) -> Result<Value, ApiError> {
        self.http.get("/health").await
    }

    pub async fn get_status(&self) -> Result<Value, ApiError> {
        self.http.get("/status").await
    }

    // Analysis

    /// Scores a resume against a job description.
    pub async fn analyze_resume(
        &self,
        resume_data: &Value,
        job_description_data: &Value,
    ) -> Result<Value, ApiError> {
        self.http
            .post(
                "/analyze",
                &AnalyzeRequest {
                    resume_data,
                    job_description_data,
                },
            )
            .await
    }

    pub async fn analyze_resume_batch(&self, batch_request: &Value) -> Result<Value, ApiError> {
        self.http.post("/analyze/batch", batch_request).await
    }

    /// Uploads both documents; every metadata entry becomes its own text
    /// field alongside the two files.
    pub async fn analyze_resume_upload(
        &self,
        resume_file: UploadFile,
        job_description_file: UploadFile,
        metadata: Option<&BTreeMap<String, String>>,
    ) -> Result<Value, ApiError> {
        let mut form = Form::new()
            .part("resume_file", resume_file.into_part()?)
            .part("job_description_file", job_description_file.into_part()?);
        for (key, value) in metadata.into_iter().flatten() {
            form = form.text(key.clone(), value.clone());
        }
        self.http.upload("/analyze/upload", form).await
    }

    // Resumes

    pub async fn get_resumes(&self, params: Option<&Query>) -> Result<Value, ApiError> {
        self.get_listing("/resumes", params).await
    }

    pub async fn get_resume_by_id(&self, id: &str) -> Result<Value, ApiError> {
        self.http.get(&format!("/resumes/{id}")).await
    }

    pub async fn get_resume_analysis(&self, id: &str) -> Result<Value, ApiError> {
        self.http.get(&format!("/resumes/{id}/analysis")).await
    }

    // Vector search

    pub async fn search_similar_resumes(
        &self,
        query: &str,
        limit: u32,
        threshold: f64,
    ) -> Result<Value, ApiError> {
        self.http
            .post(
                "/search/similar",
                &SimilarSearchRequest {
                    query,
                    limit,
                    threshold,
                },
            )
            .await
    }

    pub async fn search_by_skills(
        &self,
        skills: &[String],
        limit: u32,
        min_score: f64,
    ) -> Result<Value, ApiError> {
        self.http
            .post(
                "/search/skills",
                &SkillsSearchRequest {
                    skills,
                    limit,
                    min_score,
                },
            )
            .await
    }

    // Analysis history

    pub async fn get_analysis_history(&self, params: Option<&Query>) -> Result<Value, ApiError> {
        self.get_listing("/analysis/history", params).await
    }

    pub async fn delete_analysis(&self, id: &str) -> Result<Value, ApiError> {
        self.http.delete(&format!("/analysis/{id}")).await
    }

    // Candidates

    pub async fn get_candidates(&self, params: Option<&Query>) -> Result<Value, ApiError> {
        self.get_listing("/candidates", params).await
    }

    pub async fn get_candidate_by_id(&self, id: &str) -> Result<Value, ApiError> {
        self.http.get(&format!("/candidates/{id}")).await
    }

    // Databases, memory, events

    pub async fn get_database_status(&self) -> Result<Value, ApiError> {
        self.http.get("/databases/status").await
    }

    pub async fn refresh_database_connections(&self) -> Result<Value, ApiError> {
        self.http.post_empty("/databases/refresh").await
    }

    pub async fn get_memory_stats(&self) -> Result<Value, ApiError> {
        self.http.get("/memory/stats").await
    }

    pub async fn clear_memory(&self) -> Result<Value, ApiError> {
        self.http.post_empty("/memory/clear").await
    }

    pub async fn get_recent_events(&self, limit: u32) -> Result<Value, ApiError> {
        self.http
            .get_with_query("/events/recent", &[("limit", limit)])
            .await
    }

    pub async fn publish_event(&self, event_data: &Value) -> Result<Value, ApiError> {
        self.http.post("/events/publish", event_data).await
    }

    pub async fn get_config(&self) -> Result<Value, ApiError> {
        self.http.get("/config").await
    }

    async fn get_listing(&self, path: &str, params: Option<&Query>) -> Result<Value, ApiError> {
        match params {
            Some(q) => self.http.get_with_query(path, q).await,
            None => self.http.get(path).await,
        }
    }
}

#[async_trait]
impl AgentService for ResumeAnalyzerClient {
    fn service(&self) -> ServiceName {
        ServiceName::ResumeAnalyzer
    }

    async fn health(&self) -> Result<Value, ApiError> {
        self.get_health().await
    }

    async fn config(&self) -> Result<Value, ApiError> {
        self.get_config().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_support::spawn_stub;
    use crate::http_client::NoCredentials;
    use axum::extract::Multipart;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    async fn stub_client(router: Router) -> ResumeAnalyzerClient {
        let base = spawn_stub(router).await;
        ResumeAnalyzerClient::new(base, Arc::new(NoCredentials)).unwrap()
    }

    fn echo() -> axum::routing::MethodRouter {
        post(|Json(body): Json<Value>| async move { Json(body) })
    }

    #[tokio::test]
    async fn test_analyze_wraps_both_payloads() {
        let client = stub_client(Router::new().route("/analyze", echo())).await;

        let resume = json!({ "content": "Rust, Tokio", "candidate_name": "Ada" });
        let jd = json!({ "content": "Rust engineer", "job_title": "Engineer" });
        let body = client.analyze_resume(&resume, &jd).await.unwrap();
        assert_eq!(body["resume_data"]["candidate_name"], "Ada");
        assert_eq!(body["job_description_data"]["job_title"], "Engineer");
    }

    #[tokio::test]
    async fn test_search_defaults_are_sent() {
        let client = stub_client(
            Router::new()
                .route("/search/similar", echo())
                .route("/search/skills", echo()),
        )
        .await;

        let body = client
            .search_similar_resumes("rust", DEFAULT_SIMILAR_LIMIT, DEFAULT_SIMILAR_THRESHOLD)
            .await
            .unwrap();
        assert_eq!(body, json!({ "query": "rust", "limit": 10, "threshold": 0.7 }));

        let skills = vec!["rust".to_string(), "sql".to_string()];
        let body = client
            .search_by_skills(&skills, DEFAULT_SKILLS_LIMIT, DEFAULT_SKILLS_MIN_SCORE)
            .await
            .unwrap();
        assert_eq!(
            body,
            json!({ "skills": ["rust", "sql"], "limit": 20, "min_score": 0.6 })
        );
    }

    #[tokio::test]
    async fn test_upload_flattens_metadata_into_fields() {
        let client = stub_client(Router::new().route(
            "/analyze/upload",
            post(|mut multipart: Multipart| async move {
                let mut names = Vec::new();
                while let Some(field) = multipart.next_field().await.unwrap() {
                    names.push(field.name().unwrap_or_default().to_string());
                }
                Json(json!({ "fields": names }))
            }),
        ))
        .await;

        let mut metadata = BTreeMap::new();
        metadata.insert("candidate_email".to_string(), "ada@example.com".to_string());
        metadata.insert("candidate_name".to_string(), "Ada".to_string());

        let body = client
            .analyze_resume_upload(
                UploadFile::new("cv.pdf", b"%PDF".to_vec()),
                UploadFile::new("jd.txt", b"Rust".to_vec()),
                Some(&metadata),
            )
            .await
            .unwrap();
        assert_eq!(
            body["fields"],
            json!([
                "resume_file",
                "job_description_file",
                "candidate_email",
                "candidate_name"
            ])
        );
    }
}
