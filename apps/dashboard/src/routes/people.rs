use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::agents::UploadFile;
use crate::errors::AppError;
use crate::models::interview::Interview;
use crate::models::job_description::{
    GeneratedJobDescription, JobDetails, JobTemplate, SavedJobDescription,
};
use crate::models::resume::{AnalysisResult, AnalysisSummary};
use crate::panels::interviews::{BoardView, ScheduleForm};
use crate::panels::people::PeopleStats;
use crate::panels::resumes::AnalyzeForm;
use crate::state::AppState;

/// GET /api/v1/people/stats
pub async fn handle_people_stats(
    State(state): State<AppState>,
) -> Result<Json<PeopleStats>, AppError> {
    Ok(Json(state.people.load().await?))
}

/// GET /api/v1/jd
pub async fn handle_list_job_descriptions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SavedJobDescription>>, AppError> {
    Ok(Json(state.job_descriptions.saved().await?))
}

/// GET /api/v1/jd/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobTemplate>>, AppError> {
    Ok(Json(state.job_descriptions.templates().await?))
}

/// POST /api/v1/jd/generate
pub async fn handle_generate_job_description(
    State(state): State<AppState>,
    Json(details): Json<JobDetails>,
) -> Result<Json<GeneratedJobDescription>, AppError> {
    Ok(Json(state.job_descriptions.generate(&details).await?))
}

#[derive(Deserialize)]
pub struct CreateFromTextRequest {
    #[serde(default)]
    pub text: String,
}

/// POST /api/v1/jd/create
pub async fn handle_create_job_description(
    State(state): State<AppState>,
    Json(req): Json<CreateFromTextRequest>,
) -> Result<Json<GeneratedJobDescription>, AppError> {
    Ok(Json(state.job_descriptions.create_from_text(&req.text).await?))
}

/// POST /api/v1/jd/upload
/// Expects a `file` part and an optional `metadata` part holding JSON.
pub async fn handle_upload_job_description(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut file = None;
    let mut metadata = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                let mut upload = UploadFile::new(file_name, bytes);
                if let Some(content_type) = content_type {
                    upload = upload.with_content_type(content_type);
                }
                file = Some(upload);
            }
            Some("metadata") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                let parsed: Value = serde_json::from_str(&text)
                    .map_err(|e| AppError::Validation(format!("metadata must be JSON: {e}")))?;
                metadata = Some(parsed);
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("file is required".into()))?;
    Ok(Json(
        state
            .job_descriptions
            .upload(file, metadata.as_ref())
            .await?,
    ))
}

/// GET /api/v1/resume/history
pub async fn handle_analysis_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalysisSummary>>, AppError> {
    Ok(Json(state.resumes.history().await?))
}

/// POST /api/v1/resume/analyze
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(form): Json<AnalyzeForm>,
) -> Result<Json<AnalysisResult>, AppError> {
    Ok(Json(state.resumes.analyze(&form).await?))
}

/// GET /api/v1/interviews
pub async fn handle_interview_board(
    State(state): State<AppState>,
) -> Result<Json<BoardView>, AppError> {
    Ok(Json(state.interviews.board().await?))
}

/// POST /api/v1/interviews/schedule
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    Json(form): Json<ScheduleForm>,
) -> Result<Json<Interview>, AppError> {
    Ok(Json(state.interviews.schedule(&form).await?))
}
