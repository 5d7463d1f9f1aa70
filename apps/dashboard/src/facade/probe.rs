//! Liveness probe for the overview page: hits every agent's `/health` at
//! once and times each answer.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::warn;

use crate::agents::ServiceName;
use crate::facade::settle_all;
use crate::http_client::{ApiError, NoCredentials, ServiceHttpClient};
use crate::models::{AgentLiveness, AgentStatus};

/// One agent the overview page watches.
#[derive(Clone)]
pub struct AgentProbe {
    pub service: ServiceName,
    http: ServiceHttpClient,
}

impl AgentProbe {
    /// Probes go out unauthenticated, like a plain browser fetch.
    pub fn new(service: ServiceName, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            service,
            http: ServiceHttpClient::new(service.as_str(), base_url, Arc::new(NoCredentials))?,
        })
    }

    pub fn from_http(service: ServiceName, http: ServiceHttpClient) -> Self {
        Self { service, http }
    }

    async fn check(self) -> Result<AgentStatus, ApiError> {
        let started = Instant::now();
        let outcome = self.http.probe("/health").await;
        let elapsed = started.elapsed().as_millis() as u64;

        let (status, response_time_ms) = match outcome {
            Ok(_) => (AgentLiveness::Online, elapsed),
            Err(ApiError::Status { .. }) => (AgentLiveness::Error, 0),
            Err(_) => (AgentLiveness::Offline, 0),
        };

        Ok(AgentStatus {
            name: self.service.display_name().to_string(),
            base_url: self.http.base_url().to_string(),
            description: self.service.description().to_string(),
            status,
            last_seen: Utc::now(),
            response_time_ms,
        })
    }
}

/// Probes every agent concurrently. Individual failures are reported as
/// `offline`/`error` rows; a probe task that crashes loses only its own row.
pub async fn probe_agents(probes: &[AgentProbe]) -> Vec<AgentStatus> {
    let calls = probes
        .iter()
        .cloned()
        .map(|probe| (probe.service, probe.check()))
        .collect();

    match settle_all(calls).await {
        Ok(settled) => settled
            .into_iter()
            .filter_map(|(service, outcome)| match outcome {
                Ok(status) => Some(status),
                Err(e) => {
                    warn!("Probe for {service} did not finish: {e}");
                    None
                }
            })
            .collect(),
        Err(e) => {
            warn!("Agent probe fan-out failed: {e}");
            Vec::new()
        }
    }
}
