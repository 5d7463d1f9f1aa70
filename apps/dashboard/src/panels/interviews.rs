use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::agents::{require, InterviewSchedulerClient};
use crate::http_client::ApiError;
use crate::models::interview::{
    parse_email_templates, parse_schedule_confirmation, Candidate, CandidateContact,
    EmailTemplate, Interview, InterviewDetails, ScheduleInterviewRequest,
};
use crate::panels::{placeholders, Sourced};
use crate::view_state::hooks::InterviewSchedulerHook;

const DEFAULT_DURATION_MINUTES: u32 = 60;

/// The interview page.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub candidates: Sourced<Vec<Candidate>>,
    pub interviews: Sourced<Vec<Interview>>,
    pub email_templates: Vec<EmailTemplate>,
}

/// The schedule dialog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleForm {
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_title: String,
    pub candidate_score: f64,
    pub interview_date: String,
    pub interview_time: String,
    pub interview_type: String,
    pub interviewer_name: String,
    pub location: String,
    pub duration: Option<u32>,
}

impl ScheduleForm {
    fn validate(&self) -> Result<(), ApiError> {
        require("candidate_name", &self.candidate_name)?;
        require("candidate_email", &self.candidate_email)?;
        require("interview_date", &self.interview_date)?;
        require("interview_time", &self.interview_time)
    }

    fn to_request(&self) -> ScheduleInterviewRequest {
        ScheduleInterviewRequest {
            candidate: CandidateContact {
                name: self.candidate_name.clone(),
                email: self.candidate_email.clone(),
                position: self.job_title.clone(),
                resume_score: self.candidate_score,
                ..Default::default()
            },
            interview: InterviewDetails {
                date: self.interview_date.clone(),
                time: self.interview_time.clone(),
                duration: self.duration.unwrap_or(DEFAULT_DURATION_MINUTES),
                kind: self.interview_type.clone(),
                interviewer: self.interviewer_name.clone(),
                location: self.location.clone(),
            },
        }
    }
}

/// Candidates, interviews and email templates, plus interviews scheduled
/// from this dashboard since it started.
pub struct InterviewBoard {
    hook: Arc<InterviewSchedulerHook>,
    client: InterviewSchedulerClient,
    scheduled: Mutex<Vec<Interview>>,
}

impl InterviewBoard {
    pub fn new(hook: Arc<InterviewSchedulerHook>, client: InterviewSchedulerClient) -> Self {
        Self {
            hook,
            client,
            scheduled: Mutex::new(Vec::new()),
        }
    }

    pub async fn interviews(&self) -> Vec<Interview> {
        let mut all = placeholders::interviews();
        all.extend(self.scheduled.lock().await.iter().cloned());
        all
    }

    pub async fn board(&self) -> Result<BoardView, ApiError> {
        let email_templates = parse_email_templates(self.client.get_email_templates().await?)?;
        Ok(BoardView {
            candidates: Sourced::placeholder(placeholders::candidates()),
            interviews: Sourced::placeholder(self.interviews().await),
            email_templates,
        })
    }

    /// Books an interview and adds it to the board. The agent's id is used
    /// when it returns one, otherwise a fresh one is minted.
    pub async fn schedule(&self, form: &ScheduleForm) -> Result<Interview, ApiError> {
        form.validate()?;
        let value = self.hook.schedule_interview(&form.to_request()).await?;
        let confirmation = parse_schedule_confirmation(value)?;

        let interview = Interview {
            id: confirmation
                .interview_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            candidate_name: form.candidate_name.clone(),
            job_title: form.job_title.clone(),
            date: form.interview_date.clone(),
            time: form.interview_time.clone(),
            kind: form.interview_type.clone(),
            status: "scheduled".to_string(),
        };
        info!(interview_id = %interview.id, "Interview scheduled");
        self.scheduled.lock().await.push(interview.clone());
        Ok(interview)
    }
}
