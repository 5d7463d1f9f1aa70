//! Free-text job briefs, e.g. "Data Engineer, company: Acme, 4 years,
//! skills: python; spark, 95000 salary", turned into the job details the
//! generator's `/generate` endpoint takes.
//!
//! The first comma-separated part is the title. Every other field is picked
//! out by a `label: value` pattern that runs to the next comma.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::agents::require;
use crate::http_client::ApiError;

static COMPANY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)company:\s*([^,]+)").unwrap());
static SALARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*salary").unwrap());
static YEARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*year").unwrap());
static SKILLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)skills?:\s*([^,]+)").unwrap());
static DEPARTMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)department:\s*([^,]+)").unwrap());
static INDUSTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)industry:\s*([^,]+)").unwrap());
static LOCATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)location:\s*([^,]+)").unwrap());

/// Commas end a field, so a skill list inside one uses these instead.
const SKILL_SEPARATORS: &[char] = &[';', '/', '|'];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobBrief {
    pub job_title: String,
    pub experience_required: String,
    pub salary_range: String,
    pub company_name: String,
    pub employment_type: String,
    pub industry: String,
    pub location: String,
    pub department: String,
    pub skills_required: Vec<String>,
    pub work_location_type: String,
    pub education_required: String,
    pub benefits: Vec<String>,
    pub growth_opportunities: Vec<String>,
}

impl Default for JobBrief {
    fn default() -> Self {
        Self {
            job_title: "Custom Position".into(),
            experience_required: "To be determined".into(),
            salary_range: "Competitive".into(),
            company_name: "Your Company".into(),
            employment_type: "Full-time".into(),
            industry: "Technology".into(),
            location: "Remote".into(),
            department: "General".into(),
            skills_required: Vec::new(),
            work_location_type: "Remote".into(),
            education_required: "Bachelor's degree".into(),
            benefits: Vec::new(),
            growth_opportunities: Vec::new(),
        }
    }
}

/// Body of `POST /generate` for a brief: knowledge base and AI enhancement on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BriefRequest {
    pub job_details: JobBrief,
    pub use_knowledge_base: bool,
    pub include_ai_enhancement: bool,
}

impl From<JobBrief> for BriefRequest {
    fn from(job_details: JobBrief) -> Self {
        Self {
            job_details,
            use_knowledge_base: true,
            include_ai_enhancement: true,
        }
    }
}

/// Parses a brief. Fields the text does not mention keep their defaults;
/// blank text is a validation error.
pub fn parse_job_brief(text: &str) -> Result<JobBrief, ApiError> {
    require("text", text)?;
    let mut brief = JobBrief::default();

    if let Some(title) = text.split(',').next().map(str::trim) {
        if !title.is_empty() {
            brief.job_title = title.to_string();
        }
    }
    if let Some(company) = field(&COMPANY, text) {
        brief.company_name = company;
    }
    if let Some(salary) = number(&SALARY, text) {
        brief.salary_range = format!("${}", group_thousands(salary));
    }
    if let Some(years) = number(&YEARS, text) {
        brief.experience_required = experience_band(years).to_string();
    }
    if let Some(skills) = field(&SKILLS, text) {
        brief.skills_required = skills
            .split(SKILL_SEPARATORS)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(department) = field(&DEPARTMENT, text) {
        brief.department = department;
    }
    if let Some(industry) = field(&INDUSTRY, text) {
        brief.industry = industry;
    }
    if let Some(location) = field(&LOCATION, text) {
        brief.location = location;
    }

    Ok(brief)
}

pub fn experience_band(years: u64) -> &'static str {
    match years {
        0..=1 => "0-1 years",
        2..=3 => "2-3 years",
        4..=5 => "4-5 years",
        _ => "5+ years",
    }
}

fn field(pattern: &Regex, text: &str) -> Option<String> {
    let value = pattern.captures(text)?.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn number(pattern: &Regex, text: &str) -> Option<u64> {
    pattern.captures(text)?.get(1)?.as_str().parse().ok()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
