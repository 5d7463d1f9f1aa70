#![allow(dead_code)]

//! Per-service API clients.
//!
//! Each client is a named collection of one-line methods, one per REST
//! endpoint of its agent. Bodies go out as JSON (or multipart for uploads)
//! and come back as loosely-typed `serde_json::Value`; typed view-models are
//! parsed from those values in `models`.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::Part;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http_client::ApiError;

pub mod interview_scheduler;
pub mod jd_generator;
pub mod memory_search;
pub mod resume_analyzer;
pub mod root_agent;

pub use interview_scheduler::InterviewSchedulerClient;
pub use jd_generator::JdGeneratorClient;
pub use memory_search::MemorySearchClient;
pub use resume_analyzer::ResumeAnalyzerClient;
pub use root_agent::RootAgentClient;

/// The four agents the facade fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceName {
    RootAgent,
    JdGenerator,
    ResumeAnalyzer,
    InterviewScheduler,
}

impl ServiceName {
    pub const ALL: [ServiceName; 4] = [
        ServiceName::RootAgent,
        ServiceName::JdGenerator,
        ServiceName::ResumeAnalyzer,
        ServiceName::InterviewScheduler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceName::RootAgent => "root_agent",
            ServiceName::JdGenerator => "jd_generator",
            ServiceName::ResumeAnalyzer => "resume_analyzer",
            ServiceName::InterviewScheduler => "interview_scheduler",
        }
    }

    /// Display name used on the overview page.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceName::RootAgent => "Root Agent",
            ServiceName::JdGenerator => "JD Generator",
            ServiceName::ResumeAnalyzer => "Resume Analyzer",
            ServiceName::InterviewScheduler => "Interview Scheduler",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ServiceName::RootAgent => "Central orchestrator",
            ServiceName::JdGenerator => "Job description creation",
            ServiceName::ResumeAnalyzer => "Resume analysis and scoring",
            ServiceName::InterviewScheduler => "Interview scheduling",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The read operations every agent exposes. This is the seam the facade fans
/// out over, so tests can substitute agents that fail on demand.
#[async_trait]
pub trait AgentService: Send + Sync {
    fn service(&self) -> ServiceName;

    async fn health(&self) -> Result<Value, ApiError>;

    async fn config(&self) -> Result<Value, ApiError>;
}

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub(crate) fn into_part(self) -> Result<Part, ApiError> {
        let part = Part::bytes(self.bytes.to_vec()).file_name(self.file_name);
        match self.content_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| ApiError::Validation(format!("invalid content type '{mime}': {e}"))),
            None => Ok(part),
        }
    }
}

/// Rejects blank required text fields before any network call.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}
