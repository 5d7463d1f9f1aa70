use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http_client::ApiError;
use crate::models::{decode_list, ApiResponse, ListShape};

const UNKNOWN_COMPANY: &str = "Unknown Company";

// ────────────────────────────────────────────────────────────────────────────
// Saved job descriptions
// ────────────────────────────────────────────────────────────────────────────

/// A saved job description row as listed by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJobDescription {
    pub id: String,
    pub title: String,
    pub company: String,
    pub created_at: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawJobDescription {
    filename: String,
    #[serde(default)]
    metadata: Option<RawJobMetadata>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawJobMetadata {
    job_title: Option<String>,
    company_name: Option<String>,
    created_at: Option<String>,
    generated_at: Option<String>,
}

impl RawJobDescription {
    fn into_view(self, now: DateTime<Utc>) -> SavedJobDescription {
        let meta = self.metadata.unwrap_or_default();
        SavedJobDescription {
            id: self.filename.clone(),
            title: meta.job_title.unwrap_or_else(|| self.filename.clone()),
            company: meta
                .company_name
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            created_at: meta
                .created_at
                .or(meta.generated_at)
                .unwrap_or_else(|| now.to_rfc3339()),
            filename: self.filename,
            content: self.content,
        }
    }
}

/// Parses `GET /job-descriptions`. The generator returns either a bare array
/// or `{"job_descriptions": [...]}`.
pub fn parse_saved_job_descriptions(value: Value) -> Result<Vec<SavedJobDescription>, ApiError> {
    let raw: Vec<RawJobDescription> = decode_list(
        "/job-descriptions",
        value,
        ListShape {
            key: "job_descriptions",
            allow_bare: true,
            missing_is_empty: false,
        },
    )?;
    let now = Utc::now();
    Ok(raw.into_iter().map(|r| r.into_view(now)).collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTemplate {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub experience_required: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub growth_opportunities: Vec<String>,
    #[serde(default)]
    pub category: String,
}

/// Parses `GET /templates`: a bare array or `{"templates": [...]}`.
pub fn parse_templates(value: Value) -> Result<Vec<JobTemplate>, ApiError> {
    decode_list(
        "/templates",
        value,
        ListShape {
            key: "templates",
            allow_bare: true,
            missing_is_empty: false,
        },
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// The job details form posted to `/generate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub responsibilities: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub visa_required: bool,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub skills_required: String,
    #[serde(default)]
    pub work_location_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedJobDescription {
    pub success: bool,
    pub job_description: Option<String>,
    pub job_id: Option<String>,
    pub message: String,
    pub error: Option<String>,
    pub generated_at: String,
}

#[derive(Debug, Deserialize)]
struct GeneratedPayload {
    #[serde(default)]
    job_description: Option<String>,
    #[serde(default)]
    job_id: Option<String>,
    #[serde(default)]
    generated_at: Option<String>,
}

/// Parses the `/generate` response. `success: false` becomes `Rejected`.
pub fn parse_generated(value: Value) -> Result<GeneratedJobDescription, ApiError> {
    let envelope: ApiResponse<GeneratedPayload> = ApiResponse::from_value("/generate", value)?;
    let message = envelope
        .message
        .clone()
        .unwrap_or_else(|| "Job description generated successfully".to_string());
    let error = envelope.error.clone();
    let payload = envelope.into_result("/generate", "Failed to generate job description")?;

    Ok(GeneratedJobDescription {
        success: true,
        job_description: payload.job_description,
        job_id: payload.job_id,
        message,
        error,
        generated_at: payload
            .generated_at
            .unwrap_or_else(|| Utc::now().to_rfc3339()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_templates_object_renders_empty_list() {
        let templates = parse_templates(json!({ "templates": [] })).unwrap();
        assert!(templates.is_empty());
    }

    #[test]
    fn test_templates_bare_array() {
        let templates = parse_templates(json!([{
            "id": "t1",
            "title": "Backend Engineer",
            "required_skills": ["rust", "postgres"]
        }]))
        .unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].required_skills, vec!["rust", "postgres"]);
        assert!(templates[0].benefits.is_empty());
    }

    #[test]
    fn test_templates_wrong_shape_is_schema_mismatch() {
        let err = parse_templates(json!({ "items": [] })).unwrap_err();
        assert!(matches!(err, ApiError::SchemaMismatch { .. }));
        let err = parse_templates(json!("nope")).unwrap_err();
        assert!(matches!(err, ApiError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_saved_job_descriptions_both_shapes_and_fallbacks() {
        let bare = json!([
            {
                "filename": "jd_backend.txt",
                "metadata": {
                    "job_title": "Backend Engineer",
                    "company_name": "TechCorp",
                    "generated_at": "2024-01-10T09:00:00Z"
                }
            },
            { "filename": "jd_untitled.txt" }
        ]);
        let jds = parse_saved_job_descriptions(bare).unwrap();
        assert_eq!(jds[0].id, "jd_backend.txt");
        assert_eq!(jds[0].title, "Backend Engineer");
        assert_eq!(jds[0].created_at, "2024-01-10T09:00:00Z");
        assert_eq!(jds[1].title, "jd_untitled.txt");
        assert_eq!(jds[1].company, "Unknown Company");

        let wrapped = json!({ "job_descriptions": [{ "filename": "a.txt", "metadata": null }] });
        assert_eq!(parse_saved_job_descriptions(wrapped).unwrap().len(), 1);
    }

    #[test]
    fn test_saved_job_description_without_filename_is_mismatch() {
        let err = parse_saved_job_descriptions(json!([{ "metadata": {} }])).unwrap_err();
        assert!(matches!(err, ApiError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_generated_success_and_rejection() {
        let generated = parse_generated(json!({
            "success": true,
            "job_description": "We are hiring...",
            "job_id": "jd-9"
        }))
        .unwrap();
        assert_eq!(generated.job_id.as_deref(), Some("jd-9"));
        assert_eq!(generated.message, "Job description generated successfully");

        let err = parse_generated(json!({ "success": false, "message": "LLM unavailable" }))
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { message } if message == "LLM unavailable"));
    }
}
