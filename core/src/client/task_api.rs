use std::sync::Arc;

use serde_json::Value;

use super::r#trait::{ApiRequest, HttpMethod, Transport};
use crate::error::TransportError;
use crate::payload::RunMode;

pub const CHANNEL_HEADER: &str = "api-channel-ak";
pub const DEFAULT_CHANNEL_KEY: &str = "n8nak";

/// Only the first page is fetched for agent and workflow listings.
pub const LIST_PAGE_SIZE: u32 = 500;

/// Thin client over the task API endpoints. Stateless apart from the
/// identification header value; authentication is the transport's job.
#[derive(Clone)]
pub struct TaskApiClient {
    transport: Arc<dyn Transport>,
    channel_key: String,
}

impl TaskApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_channel_key(transport, DEFAULT_CHANNEL_KEY)
    }

    pub fn with_channel_key(transport: Arc<dyn Transport>, channel_key: impl Into<String>) -> Self {
        Self {
            transport,
            channel_key: channel_key.into(),
        }
    }

    pub async fn call(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let request = request.header(CHANNEL_HEADER, self.channel_key.as_str());
        tracing::debug!(
            target: "browseract.api",
            stage = "api.call.in",
            transport = self.transport.name(),
            method = %request.method,
            endpoint = %request.endpoint,
            has_body = request.body.is_some()
        );
        let method = request.method;
        let endpoint = request.endpoint.clone();
        let out = self.transport.call(request).await;
        match &out {
            Ok(_) => tracing::debug!(
                target: "browseract.api",
                stage = "api.call.out",
                method = %method,
                endpoint = %endpoint
            ),
            Err(err) => tracing::warn!(
                target: "browseract.api",
                stage = "api.call.err",
                method = %method,
                endpoint = %endpoint,
                kind = %err.kind(),
                error = %err
            ),
        }
        out
    }

    pub async fn list_agents(&self) -> Result<Value, TransportError> {
        self.call(list_request("/agent/list-agents")).await
    }

    pub async fn list_workflows(&self) -> Result<Value, TransportError> {
        self.call(list_request("/workflow/list-workflows")).await
    }

    pub async fn get_workflow_config(&self, workflow_id: &str) -> Result<Value, TransportError> {
        let req = ApiRequest::new(HttpMethod::Get, "/workflow/get-workflow-config")
            .query("workflow_id", workflow_id);
        self.call(req).await
    }

    pub async fn run_task(&self, mode: RunMode, body: Value) -> Result<Value, TransportError> {
        let req = ApiRequest::new(HttpMethod::Post, format!("/{}/run-task", mode.route())).json(body);
        self.call(req).await
    }

    pub async fn get_task(&self, mode: RunMode, task_id: &str) -> Result<Value, TransportError> {
        let req = ApiRequest::new(HttpMethod::Get, format!("/{}/get-task", mode.route()))
            .query("task_id", task_id);
        self.call(req).await
    }

    pub async fn stop_task(&self, mode: RunMode, task_id: &str) -> Result<Value, TransportError> {
        let req = ApiRequest::new(HttpMethod::Put, format!("/{}/stop-task", mode.route()))
            .query("task_id", task_id);
        self.call(req).await
    }
}

fn list_request(endpoint: &str) -> ApiRequest {
    ApiRequest::new(HttpMethod::Get, endpoint)
        .query("page", 1)
        .query("perPage", LIST_PAGE_SIZE)
}
