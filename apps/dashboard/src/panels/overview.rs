use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::facade::probe::{probe_agents, AgentProbe};
use crate::http_client::ApiError;
use crate::models::{AgentLiveness, AgentStatus};
use crate::panels::placeholders::{
    self, DatabaseRecord, GraphSnapshot, MemoryTier, VectorCollection,
};
use crate::panels::Sourced;
use crate::view_state::poller::mount;
use crate::view_state::{MountHandle, Refresh, ViewState, ViewStore};

/// Everything the overview page shows.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewSnapshot {
    pub agents: Vec<AgentStatus>,
    pub database_records: Sourced<Vec<DatabaseRecord>>,
    pub graph: Sourced<GraphSnapshot>,
    pub vector_collections: Sourced<Vec<VectorCollection>>,
    pub memory: Sourced<Vec<MemoryTier>>,
}

/// Overview page: live agent probes plus the data-store panels.
pub struct OverviewPanel {
    probes: Vec<AgentProbe>,
    store: ViewStore<OverviewSnapshot>,
    refresh_interval: Option<Duration>,
}

impl OverviewPanel {
    pub fn new(probes: Vec<AgentProbe>, refresh_interval: Option<Duration>) -> Self {
        Self {
            probes,
            store: ViewStore::new(None),
            refresh_interval,
        }
    }

    pub fn state(&self) -> ViewState<OverviewSnapshot> {
        self.store.snapshot()
    }

    /// Loads on mount, then every `refresh_interval`.
    pub fn mount(self: &Arc<Self>) -> MountHandle {
        mount(Arc::clone(self), true, self.refresh_interval)
    }

    pub async fn load(&self) -> Result<OverviewSnapshot, ApiError> {
        self.store
            .run("Failed to load data", async {
                let agents = probe_agents(&self.probes).await;
                let now = Utc::now();
                Ok(OverviewSnapshot {
                    agents,
                    database_records: Sourced::placeholder(placeholders::database_records(now)),
                    graph: Sourced::placeholder(placeholders::graph()),
                    vector_collections: Sourced::placeholder(placeholders::vector_collections()),
                    memory: Sourced::placeholder(placeholders::memory_tiers(now)),
                })
            })
            .await
    }
}

#[async_trait]
impl Refresh for OverviewPanel {
    async fn refresh(&self) {
        if let Ok(snapshot) = self.load().await {
            let online = snapshot
                .agents
                .iter()
                .filter(|a| a.status == AgentLiveness::Online)
                .count();
            info!(online, total = snapshot.agents.len(), "Overview refreshed");
        }
    }
}
