use std::sync::Arc;

use crate::config::Config;
use crate::facade::probe::AgentProbe;
use crate::facade::HrPhoenixApi;
use crate::http_client::ApiError;
use crate::panels::{
    InterviewBoard, JobDescriptionPanel, OverviewPanel, PeoplePanel, ResumePanel, SearchPanel,
};
use crate::view_state::hooks::{
    InterviewSchedulerHook, JdGeneratorHook, ResumeAnalyzerHook, RootAgentHook, SystemHook,
};
use crate::view_state::{HookOptions, MountHandle};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub root_agent: Arc<RootAgentHook>,
    /// Polled facade health; backs the system routes.
    pub system: Arc<SystemHook>,
    pub overview: Arc<OverviewPanel>,
    pub job_descriptions: Arc<JobDescriptionPanel>,
    pub resumes: Arc<ResumePanel>,
    pub interviews: Arc<InterviewBoard>,
    pub people: Arc<PeoplePanel>,
    pub search: Arc<SearchPanel>,
}

impl AppState {
    pub fn new(config: &Config, api: &HrPhoenixApi) -> Result<Self, ApiError> {
        let probes = api
            .agent_endpoints()
            .into_iter()
            .map(|(service, base_url)| AgentProbe::new(service, &base_url))
            .collect::<Result<Vec<_>, _>>()?;

        let root_agent = Arc::new(RootAgentHook::new(
            api.root_agent.clone(),
            HookOptions::default(),
        ));
        let system = Arc::new(SystemHook::new(
            api.fleet().clone(),
            HookOptions {
                auto_fetch: true,
                refresh_interval: config.health_refresh,
                ..HookOptions::default()
            },
        ));
        let jd_hook = Arc::new(JdGeneratorHook::new(
            api.jd_generator.clone(),
            HookOptions::default(),
        ));
        let resume_hook = Arc::new(ResumeAnalyzerHook::new(
            api.resume_analyzer.clone(),
            HookOptions::default(),
        ));
        let interview_hook = Arc::new(InterviewSchedulerHook::new(
            api.interview_scheduler.clone(),
            HookOptions::default(),
        ));

        let interviews = Arc::new(InterviewBoard::new(
            interview_hook,
            api.interview_scheduler.clone(),
        ));
        let people = Arc::new(PeoplePanel::new(
            api.jd_generator.clone(),
            api.resume_analyzer.clone(),
            Arc::clone(&interviews),
        ));

        Ok(AppState {
            overview: Arc::new(OverviewPanel::new(probes, config.overview_refresh)),
            job_descriptions: Arc::new(JobDescriptionPanel::new(
                jd_hook,
                api.jd_generator.clone(),
            )),
            resumes: Arc::new(ResumePanel::new(resume_hook, api.resume_analyzer.clone())),
            search: Arc::new(SearchPanel::new(api.memory_search.clone())),
            root_agent,
            system,
            interviews,
            people,
        })
    }

    /// Starts the background polls. They stop when the handles are dropped.
    pub fn mount_pollers(&self) -> Vec<MountHandle> {
        vec![self.system.mount(), self.overview.mount()]
    }
}
