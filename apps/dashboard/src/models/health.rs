use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agents::ServiceName;

/// Per-service health as seen by one fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Unknown,
}

/// Fleet-wide health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Result of one `check_all_services_health` call. Never persisted; the next
/// poll replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealthReport {
    pub root_agent: HealthStatus,
    pub jd_generator: HealthStatus,
    pub resume_analyzer: HealthStatus,
    pub interview_scheduler: HealthStatus,
    pub overall: OverallHealth,
}

impl ServiceHealthReport {
    /// Builds a report from per-service statuses; `overall` is healthy only
    /// when all four are.
    pub fn from_statuses(statuses: impl IntoIterator<Item = (ServiceName, HealthStatus)>) -> Self {
        let mut report = Self::unknown();
        for (service, status) in statuses {
            *report.slot_mut(service) = status;
        }
        report.overall = if ServiceName::ALL
            .iter()
            .all(|s| report.status(*s) == HealthStatus::Healthy)
        {
            OverallHealth::Healthy
        } else {
            OverallHealth::Degraded
        };
        report
    }

    /// The report used when the fan-out itself could not run.
    pub fn unknown() -> Self {
        Self {
            root_agent: HealthStatus::Unknown,
            jd_generator: HealthStatus::Unknown,
            resume_analyzer: HealthStatus::Unknown,
            interview_scheduler: HealthStatus::Unknown,
            overall: OverallHealth::Unhealthy,
        }
    }

    pub fn status(&self, service: ServiceName) -> HealthStatus {
        match service {
            ServiceName::RootAgent => self.root_agent,
            ServiceName::JdGenerator => self.jd_generator,
            ServiceName::ResumeAnalyzer => self.resume_analyzer,
            ServiceName::InterviewScheduler => self.interview_scheduler,
        }
    }

    fn slot_mut(&mut self, service: ServiceName) -> &mut HealthStatus {
        match service {
            ServiceName::RootAgent => &mut self.root_agent,
            ServiceName::JdGenerator => &mut self.jd_generator,
            ServiceName::ResumeAnalyzer => &mut self.resume_analyzer,
            ServiceName::InterviewScheduler => &mut self.interview_scheduler,
        }
    }
}

/// Config of every agent; `None` where the agent could not be asked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfigs {
    pub root_agent: Option<Value>,
    pub jd_generator: Option<Value>,
    pub resume_analyzer: Option<Value>,
    pub interview_scheduler: Option<Value>,
}

impl ServiceConfigs {
    pub fn set(&mut self, service: ServiceName, config: Option<Value>) {
        match service {
            ServiceName::RootAgent => self.root_agent = config,
            ServiceName::JdGenerator => self.jd_generator = config,
            ServiceName::ResumeAnalyzer => self.resume_analyzer = config,
            ServiceName::InterviewScheduler => self.interview_scheduler = config,
        }
    }
}

/// Liveness of one agent as shown on the overview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentLiveness {
    Online,
    Offline,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStatus {
    pub name: String,
    pub base_url: String,
    pub description: String,
    pub status: AgentLiveness,
    pub last_seen: DateTime<Utc>,
    pub response_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_healthy_is_healthy() {
        let report = ServiceHealthReport::from_statuses(
            ServiceName::ALL.map(|s| (s, HealthStatus::Healthy)),
        );
        assert_eq!(report.overall, OverallHealth::Healthy);
    }

    #[test]
    fn test_missing_service_is_unknown_and_degraded() {
        let report = ServiceHealthReport::from_statuses([
            (ServiceName::RootAgent, HealthStatus::Healthy),
            (ServiceName::JdGenerator, HealthStatus::Healthy),
            (ServiceName::ResumeAnalyzer, HealthStatus::Healthy),
        ]);
        assert_eq!(report.interview_scheduler, HealthStatus::Unknown);
        assert_eq!(report.overall, OverallHealth::Degraded);
    }

    #[test]
    fn test_unknown_report_serialization() {
        assert_eq!(
            serde_json::to_value(ServiceHealthReport::unknown()).unwrap(),
            json!({
                "root_agent": "unknown",
                "jd_generator": "unknown",
                "resume_analyzer": "unknown",
                "interview_scheduler": "unknown",
                "overall": "unhealthy"
            })
        );
    }
}
