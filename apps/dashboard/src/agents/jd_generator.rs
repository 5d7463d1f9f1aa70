use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::Form;
use serde::Serialize;
use serde_json::{json, Value};

use crate::agents::{AgentService, ServiceName, UploadFile};
use crate::http_client::{ApiError, CredentialProvider, Query, ServiceHttpClient};

/// Client for the job-description generator agent.
#[derive(Clone)]
pub struct JdGeneratorClient {
    http: ServiceHttpClient,
}

impl JdGeneratorClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        Ok(Self::from_http(ServiceHttpClient::new(
            ServiceName::JdGenerator.as_str(),
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

    // Generation

    pub async fn generate_job_description<B>(&self, request: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.http.post("/generate", request).await
    }

    pub async fn generate_job_description_advanced<B>(
        &self,
        request: &B,
    ) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.http.post("/generate/advanced", request).await
    }

    pub async fn generate_job_description_rag<B>(&self, request: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.http.post("/generate/rag", request).await
    }

    // Saved job descriptions

    pub async fn get_job_descriptions(&self, params: Option<&Query>) -> Result<Value, ApiError> {
        match params {
            Some(q) => self.http.get_with_query("/job-descriptions", q).await,
            None => self.http.get("/job-descriptions").await,
        }
    }

    pub async fn get_job_description_by_id(&self, id: &str) -> Result<Value, ApiError> {
        self.http.get(&format!("/job-descriptions/{id}")).await
    }

    pub async fn update_job_description(&self, id: &str, updates: &Value) -> Result<Value, ApiError> {
        self.http
            .put(&format!("/job-descriptions/{id}"), updates)
            .await
    }

    pub async fn delete_job_description(&self, id: &str) -> Result<Value, ApiError> {
        self.http.delete(&format!("/job-descriptions/{id}")).await
    }

    // Templates

    pub async fn get_templates(&self) -> Result<Value, ApiError> {
        self.http.get("/templates").await
    }

    pub async fn get_template_by_id(&self, id: &str) -> Result<Value, ApiError> {
        self.http.get(&format!("/templates/{id}")).await
    }

    pub async fn create_template(&self, template: &Value) -> Result<Value, ApiError> {
        self.http.post("/templates", template).await
    }

    pub async fn update_template(&self, id: &str, template: &Value) -> Result<Value, ApiError> {
        self.http.put(&format!("/templates/{id}"), template).await
    }

    pub async fn delete_template(&self, id: &str) -> Result<Value, ApiError> {
        self.http.delete(&format!("/templates/{id}")).await
    }

    // Knowledge base

    pub async fn get_knowledge_base(&self) -> Result<Value, ApiError> {
        self.http.get("/knowledge-base").await
    }

    pub async fn add_knowledge_item(&self, item: &Value) -> Result<Value, ApiError> {
        self.http.post("/knowledge-base", item).await
    }

    pub async fn update_knowledge_item(&self, id: &str, item: &Value) -> Result<Value, ApiError> {
        self.http.put(&format!("/knowledge-base/{id}"), item).await
    }

    pub async fn delete_knowledge_item(&self, id: &str) -> Result<Value, ApiError> {
        self.http.delete(&format!("/knowledge-base/{id}")).await
    }

    // Validation and analysis

    pub async fn validate_job_description(&self, content: &str) -> Result<Value, ApiError> {
        self.http.post("/validate", &json!({ "content": content })).await
    }

    pub async fn analyze_job_description(&self, id: &str) -> Result<Value, ApiError> {
        self.http
            .post_empty(&format!("/job-descriptions/{id}/analyze"))
            .await
    }

    // Files

    /// Packs `file` and optional `metadata` (as a JSON string field) into a
    /// multipart body for `/upload`.
    pub async fn upload_job_description(
        &self,
        file: UploadFile,
        metadata: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut form = Form::new().part("file", file.into_part()?);
        if let Some(metadata) = metadata {
            form = form.text("metadata", metadata.to_string());
        }
        self.http.upload("/upload", form).await
    }

    pub async fn export_job_description(&self, id: &str, format: &str) -> Result<Value, ApiError> {
        self.http
            .get_with_query(
                &format!("/job-descriptions/{id}/export"),
                &[("format", format)],
            )
            .await
    }

    pub async fn get_config(&self) -> Result<Value, ApiError> {
        self.http.get("/config").await
    }
}

#[async_trait]
impl AgentService for JdGeneratorClient {
    fn service(&self) -> ServiceName {
        ServiceName::JdGenerator
    }

    async fn health(&self) -> Result<Value, ApiError> {
        self.get_health().await
    }

    async fn config(&self) -> Result<Value, ApiError> {
        self.get_config().await
    }
}
