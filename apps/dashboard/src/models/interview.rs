use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http_client::ApiError;
use crate::models::{decode_list, ApiResponse, ListShape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub score: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: String,
    pub candidate_name: String,
    pub job_title: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub template_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub template_type: String,
}

/// Parses `GET /templates/email` (`{"templates": [...]}`; no key = none).
pub fn parse_email_templates(value: Value) -> Result<Vec<EmailTemplate>, ApiError> {
    decode_list(
        "/templates/email",
        value,
        ListShape {
            key: "templates",
            allow_bare: false,
            missing_is_empty: true,
        },
    )
}

/// Candidate half of a `/schedule` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateContact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub resume_score: f64,
}

/// Interview half of a `/schedule` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewDetails {
    pub date: String,
    pub time: String,
    /// Minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub interviewer: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInterviewRequest {
    pub candidate: CandidateContact,
    pub interview: InterviewDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfirmation {
    #[serde(default)]
    pub interview_id: Option<String>,
}

/// Parses the `/schedule` response. `success: false` becomes `Rejected`.
pub fn parse_schedule_confirmation(value: Value) -> Result<ScheduleConfirmation, ApiError> {
    ApiResponse::from_value("/schedule", value)?
        .into_result("/schedule", "Failed to schedule interview")
}
