use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::agents::{JdGeneratorClient, ResumeAnalyzerClient};
use crate::http_client::ApiError;
use crate::models::{decode_list, ListShape};
use crate::panels::{placeholders, InterviewBoard};
use crate::view_state::{ViewState, ViewStore};

/// Counters on the people landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeopleStats {
    pub total_candidates: usize,
    pub active_jobs: usize,
    pub scheduled_interviews: usize,
    pub pending_reviews: usize,
    /// Counters derived from sample data rather than an agent.
    pub placeholder_fields: Vec<&'static str>,
}

pub struct PeoplePanel {
    jd_generator: JdGeneratorClient,
    resume_analyzer: ResumeAnalyzerClient,
    board: Arc<InterviewBoard>,
    store: ViewStore<PeopleStats>,
}

impl PeoplePanel {
    pub fn new(
        jd_generator: JdGeneratorClient,
        resume_analyzer: ResumeAnalyzerClient,
        board: Arc<InterviewBoard>,
    ) -> Self {
        Self {
            jd_generator,
            resume_analyzer,
            board,
            store: ViewStore::new(None),
        }
    }

    pub fn state(&self) -> ViewState<PeopleStats> {
        self.store.snapshot()
    }

    /// Active jobs are the saved job descriptions; analysed candidates are
    /// the analysis history rows. Both are required.
    pub async fn load(&self) -> Result<PeopleStats, ApiError> {
        self.store
            .run("Failed to load people statistics", async {
                let jobs = self.jd_generator.get_job_descriptions(None).await?;
                let active_jobs = count(
                    "/job-descriptions",
                    jobs,
                    ListShape {
                        key: "job_descriptions",
                        allow_bare: true,
                        missing_is_empty: true,
                    },
                )?;

                let history = self.resume_analyzer.get_analysis_history(None).await?;
                let total_candidates = count(
                    "/analysis/history",
                    history,
                    ListShape {
                        key: "history",
                        allow_bare: false,
                        missing_is_empty: true,
                    },
                )?;

                let scheduled_interviews = self
                    .board
                    .interviews()
                    .await
                    .iter()
                    .filter(|i| i.status == "scheduled")
                    .count();
                let pending_reviews = placeholders::candidates()
                    .iter()
                    .filter(|c| c.status == "pending")
                    .count();

                Ok::<_, ApiError>(PeopleStats {
                    total_candidates,
                    active_jobs,
                    scheduled_interviews,
                    pending_reviews,
                    placeholder_fields: vec!["scheduled_interviews", "pending_reviews"],
                })
            })
            .await
    }
}

fn count(endpoint: &str, value: Value, shape: ListShape) -> Result<usize, ApiError> {
    Ok(decode_list::<Value>(endpoint, value, shape)?.len())
}
