use std::sync::Arc;

use serde_json::Value;

use crate::agents::{require, JdGeneratorClient, UploadFile};
use crate::http_client::ApiError;
use crate::models::job_brief::{parse_job_brief, BriefRequest};
use crate::models::job_description::{
    parse_generated, parse_saved_job_descriptions, parse_templates, GeneratedJobDescription,
    JobDetails, JobTemplate, SavedJobDescription,
};
use crate::view_state::hooks::JdGeneratorHook;

/// Job description pages: saved list, templates, generator form, upload.
pub struct JobDescriptionPanel {
    hook: Arc<JdGeneratorHook>,
    client: JdGeneratorClient,
}

impl JobDescriptionPanel {
    pub fn new(hook: Arc<JdGeneratorHook>, client: JdGeneratorClient) -> Self {
        Self { hook, client }
    }

    pub fn hook(&self) -> &Arc<JdGeneratorHook> {
        &self.hook
    }

    pub async fn saved(&self) -> Result<Vec<SavedJobDescription>, ApiError> {
        let value = self.hook.get_job_descriptions(None).await?;
        parse_saved_job_descriptions(value)
    }

    pub async fn templates(&self) -> Result<Vec<JobTemplate>, ApiError> {
        parse_templates(self.client.get_templates().await?)
    }

    pub async fn generate(&self, details: &JobDetails) -> Result<GeneratedJobDescription, ApiError> {
        require("job_title", &details.job_title)?;
        let value = self.hook.generate_job_description(details).await?;
        parse_generated(value)
    }

    /// The quick-create box: one line of free text becomes a generation
    /// request.
    pub async fn create_from_text(&self, text: &str) -> Result<GeneratedJobDescription, ApiError> {
        let request = BriefRequest::from(parse_job_brief(text)?);
        let value = self.hook.generate_job_description(&request).await?;
        parse_generated(value)
    }

    pub async fn upload(&self, file: UploadFile, metadata: Option<&Value>) -> Result<Value, ApiError> {
        self.hook.upload_job_description(file, metadata).await
    }
}
