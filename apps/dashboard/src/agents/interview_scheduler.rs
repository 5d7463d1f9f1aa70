use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::agents::{AgentService, ServiceName};
use crate::http_client::{ApiError, CredentialProvider, Query, ServiceHttpClient};

pub const DEFAULT_REPORT_TYPE: &str = "summary";
pub const DEFAULT_EVENTS_LIMIT: u32 = 20;

#[derive(Debug, Serialize)]
struct OptimizeScheduleRequest<'a> {
    candidate_ids: &'a [String],
    interviewer_ids: &'a [String],
    date_range: &'a Value,
    preferences: Option<&'a Value>,
}

#[derive(Debug, Serialize)]
struct RescheduleRequest<'a> {
    new_date: &'a str,
    new_time: &'a str,
    reason: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct NotificationRequest<'a> {
    interview_id: &'a str,
    notification_type: &'a str,
    recipients: &'a [String],
}

#[derive(Debug, Serialize)]
struct CalendarSyncRequest<'a> {
    calendar_type: &'a str,
    credentials: &'a Value,
}

/// Client for the interview scheduler agent.
#[derive(Clone)]
pub struct InterviewSchedulerClient {
    http: ServiceHttpClient,
}

impl InterviewSchedulerClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        Ok(Self::from_http(ServiceHttpClient::new(
            ServiceName::InterviewScheduler.as_str(),
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

    pub async fn get_health(&self) -> Result<Value, ApiError> {
        self.http.get("/health").await
    }

    pub async fn get_status(&self) -> Result<Value, ApiError> {
        self.http.get("/status").await
    }

    // Scheduling

    pub async fn schedule_interview<B>(&self, request: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.http.post("/schedule", request).await
    }

    pub async fn schedule_interviews_batch(&self, batch_request: &Value) -> Result<Value, ApiError> {
        self.http.post("/schedule/batch", batch_request).await
    }

    pub async fn optimize_schedule(
        &self,
        candidate_ids: &[String],
        interviewer_ids: &[String],
        date_range: &Value,
        preferences: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.http
            .post(
                "/schedule/optimize",
                &OptimizeScheduleRequest {
                    candidate_ids,
                    interviewer_ids,
                    date_range,
                    preferences,
                },
            )
            .await
    }

    // Interviews

    pub async fn get_interviews(&self, params: Option<&Query>) -> Result<Value, ApiError> {
        self.get_listing("/interviews", params).await
    }

    pub async fn get_interview_by_id(&self, id: &str) -> Result<Value, ApiError> {
        self.http.get(&format!("/interviews/{id}")).await
    }

    pub async fn update_interview(&self, id: &str, updates: &Value) -> Result<Value, ApiError> {
        self.http.put(&format!("/interviews/{id}"), updates).await
    }

    pub async fn cancel_interview(&self, id: &str) -> Result<Value, ApiError> {
        self.http.delete(&format!("/interviews/{id}")).await
    }

    pub async fn reschedule_interview(
        &self,
        id: &str,
        new_date: &str,
        new_time: &str,
        reason: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.http
            .post(
                &format!("/interviews/{id}/reschedule"),
                &RescheduleRequest {
                    new_date,
                    new_time,
                    reason,
                },
            )
            .await
    }

    // Availability

    pub async fn get_candidate_availability(
        &self,
        candidate_id: &str,
        params: Option<&Query>,
    ) -> Result<Value, ApiError> {
        self.get_listing(&format!("/availability/candidates/{candidate_id}"), params)
            .await
    }

    pub async fn set_candidate_availability(
        &self,
        candidate_id: &str,
        availability: &Value,
    ) -> Result<Value, ApiError> {
        self.http
            .post(
                &format!("/availability/candidates/{candidate_id}"),
                availability,
            )
            .await
    }

    pub async fn get_interviewer_availability(
        &self,
        interviewer_id: &str,
        params: Option<&Query>,
    ) -> Result<Value, ApiError> {
        self.get_listing(
            &format!("/availability/interviewers/{interviewer_id}"),
            params,
        )
        .await
    }

    pub async fn set_interviewer_availability(
        &self,
        interviewer_id: &str,
        availability: &Value,
    ) -> Result<Value, ApiError> {
        self.http
            .post(
                &format!("/availability/interviewers/{interviewer_id}"),
                availability,
            )
            .await
    }

    // Email and notifications

    pub async fn get_email_templates(&self) -> Result<Value, ApiError> {
        self.http.get("/templates/email").await
    }

    pub async fn create_email_template(&self, template: &Value) -> Result<Value, ApiError> {
        self.http.post("/templates/email", template).await
    }

    pub async fn send_notification(
        &self,
        interview_id: &str,
        notification_type: &str,
        recipients: &[String],
    ) -> Result<Value, ApiError> {
        self.http
            .post(
                "/notifications/send",
                &NotificationRequest {
                    interview_id,
                    notification_type,
                    recipients,
                },
            )
            .await
    }

    // Calendar

    pub async fn sync_calendar(
        &self,
        calendar_type: &str,
        credentials: &Value,
    ) -> Result<Value, ApiError> {
        self.http
            .post(
                "/calendar/sync",
                &CalendarSyncRequest {
                    calendar_type,
                    credentials,
                },
            )
            .await
    }

    pub async fn get_calendar_events(
        &self,
        calendar_type: &str,
        date_from: &str,
        date_to: &str,
    ) -> Result<Value, ApiError> {
        self.http
            .get_with_query(
                "/calendar/events",
                &[
                    ("calendar_type", calendar_type),
                    ("date_from", date_from),
                    ("date_to", date_to),
                ],
            )
            .await
    }

    // Reports

    pub async fn get_scheduling_report(
        &self,
        date_from: &str,
        date_to: &str,
        report_type: &str,
    ) -> Result<Value, ApiError> {
        self.http
            .get_with_query(
                "/reports/scheduling",
                &[
                    ("date_from", date_from),
                    ("date_to", date_to),
                    ("report_type", report_type),
                ],
            )
            .await
    }

    pub async fn get_scheduling_conflicts(
        &self,
        date_from: &str,
        date_to: &str,
    ) -> Result<Value, ApiError> {
        self.http
            .get_with_query(
                "/reports/conflicts",
                &[("date_from", date_from), ("date_to", date_to)],
            )
            .await
    }

    // Databases, memory, events

    pub async fn get_database_status(&self) -> Result<Value, ApiError> {
        self.http.get("/databases/status").await
    }

    pub async fn refresh_database_connections(&self) -> Result<Value, ApiError> {
        self.http.post_empty("/databases/refresh").await
    }

    pub async fn get_memory_stats(&self) -> Result<Value, ApiError> {
        self.http.get("/memory/stats").await
    }

    pub async fn clear_memory(&self) -> Result<Value, ApiError> {
        self.http.post_empty("/memory/clear").await
    }

    pub async fn get_recent_events(&self, limit: u32) -> Result<Value, ApiError> {
        self.http
            .get_with_query("/events/recent", &[("limit", limit)])
            .await
    }

    pub async fn publish_event(&self, event_data: &Value) -> Result<Value, ApiError> {
        self.http.post("/events/publish", event_data).await
    }

    pub async fn get_config(&self) -> Result<Value, ApiError> {
        self.http.get("/config").await
    }

    async fn get_listing(&self, path: &str, params: Option<&Query>) -> Result<Value, ApiError> {
        match params {
            Some(q) => self.http.get_with_query(path, q).await,
            None => self.http.get(path).await,
        }
    }
}

#[async_trait]
impl AgentService for InterviewSchedulerClient {
    fn service(&self) -> ServiceName {
        ServiceName::InterviewScheduler
    }

    async fn health(&self) -> Result<Value, ApiError> {
        self.get_health().await
    }

    async fn config(&self) -> Result<Value, ApiError> {
        self.get_config().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_support::spawn_stub;
    use crate::http_client::NoCredentials;
    use axum::extract::{Path, Query as QueryExtract};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    async fn stub_client(router: Router) -> InterviewSchedulerClient {
        let base = spawn_stub(router).await;
        InterviewSchedulerClient::new(base, Arc::new(NoCredentials)).unwrap()
    }

    #[tokio::test]
    async fn test_reschedule_body_and_path() {
        let client = stub_client(Router::new().route(
            "/interviews/:id/reschedule",
            post(
                |Path(id): Path<String>, Json(body): Json<Value>| async move {
                    Json(json!({ "id": id, "body": body }))
                },
            ),
        ))
        .await;

        let resp = client
            .reschedule_interview("iv-7", "2024-03-01", "10:30", Some("conflict"))
            .await
            .unwrap();
        assert_eq!(resp["id"], "iv-7");
        assert_eq!(
            resp["body"],
            json!({ "new_date": "2024-03-01", "new_time": "10:30", "reason": "conflict" })
        );
    }

    #[tokio::test]
    async fn test_scheduling_report_query() {
        let client = stub_client(Router::new().route(
            "/reports/scheduling",
            get(|QueryExtract(q): QueryExtract<Query>| async move { Json(json!(q)) }),
        ))
        .await;

        let resp = client
            .get_scheduling_report("2024-01-01", "2024-01-31", DEFAULT_REPORT_TYPE)
            .await
            .unwrap();
        assert_eq!(
            resp,
            json!({ "date_from": "2024-01-01", "date_to": "2024-01-31", "report_type": "summary" })
        );
    }

    #[tokio::test]
    async fn test_notification_payload() {
        let client = stub_client(Router::new().route(
            "/notifications/send",
            post(|Json(body): Json<Value>| async move { Json(body) }),
        ))
        .await;

        let recipients = vec!["ada@example.com".to_string()];
        let resp = client
            .send_notification("iv-1", "reminder", &recipients)
            .await
            .unwrap();
        assert_eq!(
            resp,
            json!({
                "interview_id": "iv-1",
                "notification_type": "reminder",
                "recipients": ["ada@example.com"]
            })
        );
    }
}
