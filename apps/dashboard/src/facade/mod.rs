//! Aggregate facade over the agent clients.
//!
//! Fan-outs are best-effort: every call runs to completion regardless of the
//! others, and a failing agent shows up as `unhealthy`/`null` in the result
//! rather than as an error. The dashboard must keep rendering while any
//! subset of agents is down.

use std::future::Future;
use std::sync::Arc;

use tokio::task::{JoinError, JoinSet};
use tracing::{error, warn};

use crate::agents::{
    AgentService, InterviewSchedulerClient, JdGeneratorClient, MemorySearchClient,
    ResumeAnalyzerClient, RootAgentClient, ServiceName,
};
use crate::config::Config;
use crate::http_client::{ApiError, CredentialProvider};
use crate::models::{HealthStatus, ServiceConfigs, ServiceHealthReport};

pub mod probe;

/// Runs every call concurrently and waits for all of them to settle.
///
/// Returns each call's own `Result` in input order. A call that panics
/// settles as `ApiError::TaskFailed` in its own slot; the others keep their
/// outcomes. Fails as a whole only if the join set itself loses a task.
pub async fn settle_all<K, T, Fut>(
    calls: Vec<(K, Fut)>,
) -> Result<Vec<(K, Result<T, ApiError>)>, JoinError>
where
    K: Send + 'static,
    T: Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let total = calls.len();
    let mut tasks = JoinSet::new();
    for (index, (key, call)) in calls.into_iter().enumerate() {
        tasks.spawn(async move {
            let outcome = match tokio::spawn(call).await {
                Ok(outcome) => outcome,
                Err(e) => Err(ApiError::TaskFailed(e.to_string())),
            };
            (index, key, outcome)
        });
    }

    let mut settled = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        settled.push(joined?);
    }
    settled.sort_by_key(|(index, _, _)| *index);

    Ok(settled
        .into_iter()
        .map(|(_, key, outcome)| (key, outcome))
        .collect())
}

/// The four agents as trait objects, in `ServiceName::ALL` order.
#[derive(Clone)]
pub struct Fleet {
    services: Vec<Arc<dyn AgentService>>,
}

impl Fleet {
    pub fn new(services: Vec<Arc<dyn AgentService>>) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &[Arc<dyn AgentService>] {
        &self.services
    }

    /// Health of every agent. Never fails: rejected or crashed calls become
    /// `unhealthy`, and a fan-out that cannot complete yields the all-`unknown`
    /// report.
    pub async fn check_all_services_health(&self) -> ServiceHealthReport {
        let calls = self
            .services
            .iter()
            .map(|svc| {
                let svc = Arc::clone(svc);
                (svc.service(), async move { svc.health().await })
            })
            .collect();

        match settle_all(calls).await {
            Ok(settled) => ServiceHealthReport::from_statuses(settled.into_iter().map(
                |(service, outcome)| match outcome {
                    Ok(_) => (service, HealthStatus::Healthy),
                    Err(e) => {
                        warn!("Health check failed for {service}: {e}");
                        (service, HealthStatus::Unhealthy)
                    }
                },
            )),
            Err(e) => {
                error!("Health check failed: {e}");
                ServiceHealthReport::unknown()
            }
        }
    }

    /// Config of every agent; `None` for agents whose call failed.
    pub async fn get_all_configs(&self) -> ServiceConfigs {
        let calls = self
            .services
            .iter()
            .map(|svc| {
                let svc = Arc::clone(svc);
                (svc.service(), async move { svc.config().await })
            })
            .collect();

        let mut configs = ServiceConfigs::default();
        match settle_all(calls).await {
            Ok(settled) => {
                for (service, outcome) in settled {
                    match outcome {
                        Ok(config) => configs.set(service, Some(config)),
                        Err(e) => warn!("Config retrieval failed for {service}: {e}"),
                    }
                }
            }
            Err(e) => error!("Config retrieval failed: {e}"),
        }
        configs
    }
}

/// Every agent client behind one handle.
#[derive(Clone)]
pub struct HrPhoenixApi {
    pub root_agent: RootAgentClient,
    pub jd_generator: JdGeneratorClient,
    pub resume_analyzer: ResumeAnalyzerClient,
    pub interview_scheduler: InterviewSchedulerClient,
    pub memory_search: MemorySearchClient,
    fleet: Fleet,
}

impl HrPhoenixApi {
    pub fn from_config(
        config: &Config,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        Ok(Self::new(
            RootAgentClient::new(&config.root_agent_url, Arc::clone(&credentials))?,
            JdGeneratorClient::new(&config.jd_generator_url, Arc::clone(&credentials))?,
            ResumeAnalyzerClient::new(&config.resume_analyzer_url, Arc::clone(&credentials))?,
            InterviewSchedulerClient::new(
                &config.interview_scheduler_url,
                Arc::clone(&credentials),
            )?,
            MemorySearchClient::new(&config.memory_search_url, credentials)?,
        ))
    }

    pub fn new(
        root_agent: RootAgentClient,
        jd_generator: JdGeneratorClient,
        resume_analyzer: ResumeAnalyzerClient,
        interview_scheduler: InterviewSchedulerClient,
        memory_search: MemorySearchClient,
    ) -> Self {
        let fleet = Fleet::new(vec![
            Arc::new(root_agent.clone()),
            Arc::new(jd_generator.clone()),
            Arc::new(resume_analyzer.clone()),
            Arc::new(interview_scheduler.clone()),
        ]);
        Self {
            root_agent,
            jd_generator,
            resume_analyzer,
            interview_scheduler,
            memory_search,
            fleet,
        }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub async fn check_all_services_health(&self) -> ServiceHealthReport {
        self.fleet.check_all_services_health().await
    }

    pub async fn get_all_configs(&self) -> ServiceConfigs {
        self.fleet.get_all_configs().await
    }

    /// Base URL of each agent, for the overview probe.
    pub fn agent_endpoints(&self) -> Vec<(ServiceName, String)> {
        vec![
            (
                ServiceName::RootAgent,
                self.root_agent.http().base_url().to_string(),
            ),
            (
                ServiceName::JdGenerator,
                self.jd_generator.http().base_url().to_string(),
            ),
            (
                ServiceName::ResumeAnalyzer,
                self.resume_analyzer.http().base_url().to_string(),
            ),
            (
                ServiceName::InterviewScheduler,
                self.interview_scheduler.http().base_url().to_string(),
            ),
        ]
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{fleet, Behavior};
    use super::*;
    use crate::models::OverallHealth;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_every_failure_subset_degrades() {
        for mask in 0u8..16 {
            let behaviors: [Behavior; 4] = std::array::from_fn(|i| {
                if mask & (1 << i) != 0 {
                    Behavior::Fail
                } else {
                    Behavior::Ok
                }
            });
            let report = fleet(behaviors).check_all_services_health().await;

            for (i, service) in ServiceName::ALL.iter().enumerate() {
                let expected = if mask & (1 << i) != 0 {
                    HealthStatus::Unhealthy
                } else {
                    HealthStatus::Healthy
                };
                assert_eq!(report.status(*service), expected, "mask {mask:04b}");
            }
            let expected_overall = if mask == 0 {
                OverallHealth::Healthy
            } else {
                OverallHealth::Degraded
            };
            assert_eq!(report.overall, expected_overall, "mask {mask:04b}");
        }
    }

    #[tokio::test]
    async fn test_single_rejection_isolated_in_each_position() {
        for position in 0..4 {
            let mut behaviors = [Behavior::Ok; 4];
            behaviors[position] = Behavior::Fail;
            let report = fleet(behaviors).check_all_services_health().await;
            assert_eq!(report.overall, OverallHealth::Degraded);
            assert_eq!(
                report.status(ServiceName::ALL[position]),
                HealthStatus::Unhealthy
            );
        }
    }

    #[tokio::test]
    async fn test_root_agent_down_report_is_exact() {
        let report = fleet([Behavior::Fail, Behavior::Ok, Behavior::Ok, Behavior::Ok])
            .check_all_services_health()
            .await;
        assert_eq!(
            serde_json::to_value(report).unwrap(),
            json!({
                "root_agent": "unhealthy",
                "jd_generator": "healthy",
                "resume_analyzer": "healthy",
                "interview_scheduler": "healthy",
                "overall": "degraded"
            })
        );
    }

    #[tokio::test]
    async fn test_crashed_agent_only_marks_itself_unhealthy() {
        let report = fleet([Behavior::Ok, Behavior::Panic, Behavior::Ok, Behavior::Ok])
            .check_all_services_health()
            .await;
        assert_eq!(
            serde_json::to_value(report).unwrap(),
            json!({
                "root_agent": "healthy",
                "jd_generator": "unhealthy",
                "resume_analyzer": "healthy",
                "interview_scheduler": "healthy",
                "overall": "degraded"
            })
        );
    }

    #[tokio::test]
    async fn test_crashed_agent_config_is_null_others_kept() {
        let configs = fleet([Behavior::Panic, Behavior::Ok, Behavior::Ok, Behavior::Ok])
            .get_all_configs()
            .await;
        assert_eq!(configs.root_agent, None);
        assert_eq!(configs.jd_generator, Some(json!({ "service": "jd_generator" })));
    }

    async fn crashing_call() -> Result<u64, ApiError> {
        panic!("call crashed")
    }

    #[tokio::test]
    async fn test_settle_all_keeps_slot_of_panicked_call() {
        let calls: Vec<(usize, std::pin::Pin<Box<dyn Future<Output = Result<u64, ApiError>> + Send>>)> = vec![
            (0, Box::pin(async { Ok(1) })),
            (1, Box::pin(crashing_call())),
            (2, Box::pin(async { Ok(3) })),
        ];

        let settled = settle_all(calls).await.unwrap();
        assert_eq!(*settled[0].1.as_ref().unwrap(), 1);
        assert!(matches!(settled[1].1, Err(ApiError::TaskFailed(_))));
        assert_eq!(*settled[2].1.as_ref().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_configs_null_for_failed_agents() {
        let configs = fleet([Behavior::Ok, Behavior::Fail, Behavior::Ok, Behavior::Fail])
            .get_all_configs()
            .await;
        assert_eq!(configs.root_agent, Some(json!({ "service": "root_agent" })));
        assert_eq!(configs.jd_generator, None);
        assert_eq!(
            configs.resume_analyzer,
            Some(json!({ "service": "resume_analyzer" }))
        );
        assert_eq!(configs.interview_scheduler, None);
    }

    #[tokio::test]
    async fn test_settle_all_waits_for_slow_calls_and_keeps_order() {
        let calls: Vec<(usize, std::pin::Pin<Box<dyn Future<Output = Result<u64, ApiError>> + Send>>)> = vec![
            (
                0,
                Box::pin(async {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(1)
                }),
            ),
            (
                1,
                Box::pin(async { Err(ApiError::Validation("boom".into())) }),
            ),
            (2, Box::pin(async { Ok(3) })),
        ];

        let settled = settle_all(calls).await.unwrap();
        assert_eq!(settled.len(), 3);
        assert_eq!(settled[0].0, 0);
        assert_eq!(*settled[0].1.as_ref().unwrap(), 1);
        assert!(settled[1].1.is_err());
        assert_eq!(*settled[2].1.as_ref().unwrap(), 3);
    }
}
