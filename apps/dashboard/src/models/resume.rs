use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http_client::{decode, ApiError};
use crate::models::{decode_list, ApiResponse, ListShape};

/// One resume skill and whether the job asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub matched: bool,
}

/// Score card for one resume against one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub skills_match: Vec<SkillMatch>,
    pub job_skills: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    overall_score: f64,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    skills_analysis: Option<RawSkillsAnalysis>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSkillsAnalysis {
    #[serde(default)]
    resume_skills: Vec<String>,
    #[serde(default)]
    job_skills: Vec<String>,
}

impl From<RawAnalysis> for AnalysisResult {
    fn from(raw: RawAnalysis) -> Self {
        let skills = raw.skills_analysis.unwrap_or_default();
        let skills_match = skills
            .resume_skills
            .iter()
            .map(|skill| SkillMatch {
                skill: skill.clone(),
                matched: skills.job_skills.contains(skill),
            })
            .collect();

        AnalysisResult {
            score: raw.overall_score,
            strengths: raw.strengths,
            weaknesses: raw.weaknesses,
            recommendations: raw.recommendations,
            skills_match,
            job_skills: skills.job_skills,
        }
    }
}

/// Parses the `/analyze` response. The score card sits under
/// `analysis_result` or, for older analyzers, at the top level.
pub fn parse_analysis(value: Value) -> Result<AnalysisResult, ApiError> {
    let envelope: ApiResponse<Value> = ApiResponse::from_value("/analyze", value)?;
    let mut payload = envelope.into_result("/analyze", "Analysis failed")?;

    let raw = match payload.get_mut("analysis_result").map(Value::take) {
        Some(nested @ Value::Object(_)) => nested,
        _ => payload,
    };
    let raw: RawAnalysis = decode("/analyze", raw)?;
    Ok(raw.into())
}

/// A row of the analysis history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub id: String,
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: String,
}

/// Parses `GET /analysis/history` (`{"history": [...]}`; no key = no rows).
pub fn parse_analysis_history(value: Value) -> Result<Vec<AnalysisSummary>, ApiError> {
    decode_list(
        "/analysis/history",
        value,
        ListShape {
            key: "history",
            allow_bare: false,
            missing_is_empty: true,
        },
    )
}

/// The resume half of an `/analyze` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub candidate_email: String,
    #[serde(default)]
    pub file_name: String,
}

/// The job half of an `/analyze` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionData {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
}
