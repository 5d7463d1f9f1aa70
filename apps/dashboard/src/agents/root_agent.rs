use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::agents::{AgentService, ServiceName};
use crate::http_client::{ApiError, CredentialProvider, ServiceHttpClient};

pub const DEFAULT_WORKFLOW_HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Serialize)]
struct ProcessQueryRequest<'a> {
    query_text: &'a str,
    context: Option<&'a Value>,
}

/// Client for the root orchestrator agent.
#[derive(Clone)]
pub struct RootAgentClient {
    http: ServiceHttpClient,
}

impl RootAgentClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        Ok(Self::from_http(ServiceHttpClient::new(
            ServiceName::RootAgent.as_str(),
            base_url,
            credentials,
        )?))
    }

    pub fn from_http(http: ServiceHttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &ServiceHttpClient {
        &self.http
    }

    // Health and status

    pub async fn get_health(&self) -> Result<Value, ApiError> {
        self.http.get("/health").await
    }

    pub async fn get_status(&self) -> Result<Value, ApiError> {
        self.http.get("/status").await
    }

    pub async fn get_deployment_status(&self) -> Result<Value, ApiError> {
        self.http.get("/deployment-status").await
    }

    // Query processing

    /// Routes a natural-language query through the orchestrator.
    pub async fn process_query(
        &self,
        query: &str,
        context: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.http
            .post(
                "/process-query",
                &ProcessQueryRequest {
                    query_text: query,
                    context,
                },
            )
            .await
    }

    // Workflows

    pub async fn get_active_workflows(&self) -> Result<Value, ApiError> {
        self.http.get("/workflows/active").await
    }

    pub async fn get_workflow_history(&self, limit: u32) -> Result<Value, ApiError> {
        self.http
            .get_with_query("/workflows/history", &[("limit", limit)])
            .await
    }

    pub async fn get_workflow_details(&self, workflow_id: &str) -> Result<Value, ApiError> {
        self.http.get(&format!("/workflows/{workflow_id}")).await
    }

    // Agents

    pub async fn get_agents_status(&self) -> Result<Value, ApiError> {
        self.http.get("/agents/status").await
    }

    pub async fn test_agent_connection(&self, agent_name: &str) -> Result<Value, ApiError> {
        self.http
            .post_empty(&format!("/agents/{agent_name}/test"))
            .await
    }

    // Memory

    pub async fn get_memory_stats(&self) -> Result<Value, ApiError> {
        self.http.get("/memory/stats").await
    }

    pub async fn clear_memory(&self) -> Result<Value, ApiError> {
        self.http.post_empty("/memory/clear").await
    }

    pub async fn get_config(&self) -> Result<Value, ApiError> {
        self.http.get("/config").await
    }
}

#[async_trait]
impl AgentService for RootAgentClient {
    fn service(&self) -> ServiceName {
        ServiceName::RootAgent
    }

    async fn health(&self) -> Result<Value, ApiError> {
        self.get_health().await
    }

    async fn config(&self) -> Result<Value, ApiError> {
        self.get_config().await
    }
}
