#![allow(dead_code)]

//! Per-domain hooks. Each wraps one agent client in a `ViewStore` and names
//! a default action, the one that runs on mount and on every poll.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::agents::resume_analyzer::{DEFAULT_SIMILAR_LIMIT, DEFAULT_SIMILAR_THRESHOLD};
use crate::agents::root_agent::DEFAULT_WORKFLOW_HISTORY_LIMIT;
use crate::agents::{
    InterviewSchedulerClient, JdGeneratorClient, ResumeAnalyzerClient, RootAgentClient,
    UploadFile,
};
use crate::facade::Fleet;
use crate::http_client::{ApiError, Query};
use crate::models::{ServiceConfigs, ServiceHealthReport};
use crate::view_state::poller::{mount, MountHandle, Refresh};
use crate::view_state::{HookOptions, ViewState, ViewStore};

fn mount_with<H, T>(hook: &Arc<H>, options: &HookOptions<T>) -> MountHandle
where
    H: Refresh,
{
    mount(Arc::clone(hook), options.auto_fetch, options.refresh_interval)
}

// ──────────────────────────────────────────────────────────────────────────────
// Root agent
// ──────────────────────────────────────────────────────────────────────────────

/// Default action: `check_health`.
pub struct RootAgentHook {
    client: RootAgentClient,
    store: ViewStore<Value>,
    options: HookOptions<Value>,
}

impl RootAgentHook {
    pub fn new(client: RootAgentClient, options: HookOptions<Value>) -> Self {
        Self {
            client,
            store: ViewStore::new(None).with_callbacks(&options),
            options,
        }
    }

    pub fn state(&self) -> ViewState<Value> {
        self.store.snapshot()
    }

    pub fn mount(self: &Arc<Self>) -> MountHandle {
        mount_with(self, &self.options)
    }

    pub async fn check_health(&self) -> Result<Value, ApiError> {
        self.store
            .run("Health check failed", self.client.get_health())
            .await
    }

    pub async fn process_query(&self, query: &str, context: Option<&Value>) -> Result<Value, ApiError> {
        self.store
            .run("Query processing failed", self.client.process_query(query, context))
            .await
    }

    pub async fn get_deployment_status(&self) -> Result<Value, ApiError> {
        self.store
            .run(
                "Failed to get deployment status",
                self.client.get_deployment_status(),
            )
            .await
    }

    pub async fn get_workflow_history(&self, limit: Option<u32>) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_WORKFLOW_HISTORY_LIMIT);
        self.store
            .run(
                "Failed to get workflow history",
                self.client.get_workflow_history(limit),
            )
            .await
    }
}

#[async_trait]
impl Refresh for RootAgentHook {
    async fn refresh(&self) {
        let _ = self.check_health().await;
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// JD generator
// ──────────────────────────────────────────────────────────────────────────────

/// Default action: `get_job_descriptions` without filters.
pub struct JdGeneratorHook {
    client: JdGeneratorClient,
    store: ViewStore<Value>,
    options: HookOptions<Value>,
}

impl JdGeneratorHook {
    pub fn new(client: JdGeneratorClient, options: HookOptions<Value>) -> Self {
        Self {
            client,
            store: ViewStore::new(None).with_callbacks(&options),
            options,
        }
    }

    pub fn state(&self) -> ViewState<Value> {
        self.store.snapshot()
    }

    pub fn mount(self: &Arc<Self>) -> MountHandle {
        mount_with(self, &self.options)
    }

    pub async fn generate_job_description<B>(&self, request: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.store
            .run(
                "Job description generation failed",
                self.client.generate_job_description(request),
            )
            .await
    }

    pub async fn get_job_descriptions(&self, params: Option<&Query>) -> Result<Value, ApiError> {
        self.store
            .run(
                "Failed to get job descriptions",
                self.client.get_job_descriptions(params),
            )
            .await
    }

    pub async fn upload_job_description(
        &self,
        file: UploadFile,
        metadata: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.store
            .run(
                "Job description upload failed",
                self.client.upload_job_description(file, metadata),
            )
            .await
    }
}

#[async_trait]
impl Refresh for JdGeneratorHook {
    async fn refresh(&self) {
        let _ = self.get_job_descriptions(None).await;
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Resume analyzer
// ──────────────────────────────────────────────────────────────────────────────

/// Default action: `get_candidates` without filters.
pub struct ResumeAnalyzerHook {
    client: ResumeAnalyzerClient,
    store: ViewStore<Value>,
    options: HookOptions<Value>,
}

impl ResumeAnalyzerHook {
    pub fn new(client: ResumeAnalyzerClient, options: HookOptions<Value>) -> Self {
        Self {
            client,
            store: ViewStore::new(None).with_callbacks(&options),
            options,
        }
    }

    pub fn state(&self) -> ViewState<Value> {
        self.store.snapshot()
    }

    pub fn mount(self: &Arc<Self>) -> MountHandle {
        mount_with(self, &self.options)
    }

    pub async fn analyze_resume(
        &self,
        resume_data: &Value,
        job_description_data: &Value,
    ) -> Result<Value, ApiError> {
        self.store
            .run(
                "Resume analysis failed",
                self.client.analyze_resume(resume_data, job_description_data),
            )
            .await
    }

    pub async fn analyze_resumes_batch(&self, batch_request: &Value) -> Result<Value, ApiError> {
        self.store
            .run(
                "Batch analysis failed",
                self.client.analyze_resume_batch(batch_request),
            )
            .await
    }

    pub async fn analyze_resume_upload(
        &self,
        resume_file: UploadFile,
        job_description_file: UploadFile,
        metadata: Option<&BTreeMap<String, String>>,
    ) -> Result<Value, ApiError> {
        self.store
            .run(
                "Resume upload analysis failed",
                self.client
                    .analyze_resume_upload(resume_file, job_description_file, metadata),
            )
            .await
    }

    pub async fn search_similar_resumes(
        &self,
        query: &str,
        limit: Option<u32>,
        threshold: Option<f64>,
    ) -> Result<Value, ApiError> {
        self.store
            .run(
                "Resume search failed",
                self.client.search_similar_resumes(
                    query,
                    limit.unwrap_or(DEFAULT_SIMILAR_LIMIT),
                    threshold.unwrap_or(DEFAULT_SIMILAR_THRESHOLD),
                ),
            )
            .await
    }

    pub async fn get_candidates(&self, params: Option<&Query>) -> Result<Value, ApiError> {
        self.store
            .run("Failed to get candidates", self.client.get_candidates(params))
            .await
    }
}

#[async_trait]
impl Refresh for ResumeAnalyzerHook {
    async fn refresh(&self) {
        let _ = self.get_candidates(None).await;
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Interview scheduler
// ──────────────────────────────────────────────────────────────────────────────

/// Default action: `get_interviews` without filters.
pub struct InterviewSchedulerHook {
    client: InterviewSchedulerClient,
    store: ViewStore<Value>,
    options: HookOptions<Value>,
}

impl InterviewSchedulerHook {
    pub fn new(client: InterviewSchedulerClient, options: HookOptions<Value>) -> Self {
        Self {
            client,
            store: ViewStore::new(None).with_callbacks(&options),
            options,
        }
    }

    pub fn state(&self) -> ViewState<Value> {
        self.store.snapshot()
    }

    pub fn mount(self: &Arc<Self>) -> MountHandle {
        mount_with(self, &self.options)
    }

    pub async fn schedule_interview<B>(&self, request: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.store
            .run(
                "Interview scheduling failed",
                self.client.schedule_interview(request),
            )
            .await
    }

    pub async fn schedule_interviews_batch(&self, batch_request: &Value) -> Result<Value, ApiError> {
        self.store
            .run(
                "Batch scheduling failed",
                self.client.schedule_interviews_batch(batch_request),
            )
            .await
    }

    pub async fn get_interviews(&self, params: Option<&Query>) -> Result<Value, ApiError> {
        self.store
            .run("Failed to get interviews", self.client.get_interviews(params))
            .await
    }

    pub async fn get_candidate_availability(
        &self,
        candidate_id: &str,
        params: Option<&Query>,
    ) -> Result<Value, ApiError> {
        self.store
            .run(
                "Failed to get candidate availability",
                self.client.get_candidate_availability(candidate_id, params),
            )
            .await
    }
}

#[async_trait]
impl Refresh for InterviewSchedulerHook {
    async fn refresh(&self) {
        let _ = self.get_interviews(None).await;
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// System
// ──────────────────────────────────────────────────────────────────────────────

/// Whatever the system hook fetched last.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SystemData {
    Health(ServiceHealthReport),
    Configs(ServiceConfigs),
}

/// Default action: `check_all_services_health`.
pub struct SystemHook {
    fleet: Fleet,
    store: ViewStore<SystemData>,
    options: HookOptions<SystemData>,
}

impl SystemHook {
    pub fn new(fleet: Fleet, options: HookOptions<SystemData>) -> Self {
        Self {
            fleet,
            store: ViewStore::new(None).with_callbacks(&options),
            options,
        }
    }

    pub fn state(&self) -> ViewState<SystemData> {
        self.store.snapshot()
    }

    pub fn mount(self: &Arc<Self>) -> MountHandle {
        mount_with(self, &self.options)
    }

    /// The fan-out absorbs agent failures, so this only fails if the store
    /// is asked to record an error from elsewhere.
    pub async fn check_all_services_health(&self) -> Result<ServiceHealthReport, ApiError> {
        let data = self
            .store
            .run("Health check failed", async {
                Ok(SystemData::Health(self.fleet.check_all_services_health().await))
            })
            .await?;
        match data {
            SystemData::Health(report) => Ok(report),
            SystemData::Configs(_) => Ok(ServiceHealthReport::unknown()),
        }
    }

    pub async fn get_all_configs(&self) -> Result<ServiceConfigs, ApiError> {
        let data = self
            .store
            .run("Config retrieval failed", async {
                Ok(SystemData::Configs(self.fleet.get_all_configs().await))
            })
            .await?;
        match data {
            SystemData::Configs(configs) => Ok(configs),
            SystemData::Health(_) => Ok(ServiceConfigs::default()),
        }
    }

    /// Last health report the hook holds, if its latest fetch was a health
    /// check.
    pub fn latest_health(&self) -> Option<ServiceHealthReport> {
        match self.store.snapshot().data {
            Some(SystemData::Health(report)) => Some(report),
            _ => None,
        }
    }
}

#[async_trait]
impl Refresh for SystemHook {
    async fn refresh(&self) {
        let _ = self.check_all_services_health().await;
    }
}
