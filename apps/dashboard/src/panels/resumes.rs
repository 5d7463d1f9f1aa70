use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agents::{require, ResumeAnalyzerClient};
use crate::http_client::ApiError;
use crate::models::resume::{
    parse_analysis, parse_analysis_history, AnalysisResult, AnalysisSummary, JobDescriptionData,
    ResumeData,
};
use crate::view_state::hooks::ResumeAnalyzerHook;

/// Body of the analyze form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeForm {
    pub resume: ResumeData,
    pub job_description: JobDescriptionData,
}

/// Resume page: analyze form and history table.
pub struct ResumePanel {
    hook: Arc<ResumeAnalyzerHook>,
    client: ResumeAnalyzerClient,
}

impl ResumePanel {
    pub fn new(hook: Arc<ResumeAnalyzerHook>, client: ResumeAnalyzerClient) -> Self {
        Self { hook, client }
    }

    pub fn hook(&self) -> &Arc<ResumeAnalyzerHook> {
        &self.hook
    }

    pub async fn history(&self) -> Result<Vec<AnalysisSummary>, ApiError> {
        parse_analysis_history(self.client.get_analysis_history(None).await?)
    }

    /// Needs resume text and either the job description text or its title.
    pub async fn analyze(&self, form: &AnalyzeForm) -> Result<AnalysisResult, ApiError> {
        require("resume.content", &form.resume.content)?;
        let jd = &form.job_description;
        if jd.content.trim().is_empty() && jd.job_title.trim().is_empty() {
            return Err(ApiError::Validation(
                "job_description.content or job_description.job_title is required".into(),
            ));
        }

        let resume_data = to_body(&form.resume)?;
        let job_description_data = to_body(jd)?;
        let value = self
            .hook
            .analyze_resume(&resume_data, &job_description_data)
            .await?;
        parse_analysis(value)
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Validation(e.to_string()))
}
