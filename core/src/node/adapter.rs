use serde_json::{json, Value};

use super::context::ExecutionContext;
use super::params;
use crate::client::TaskApiClient;
use crate::error::AdapterError;
use crate::fields::{FieldResolver, FieldSchemaEntry, OptionEntry};
use crate::lifecycle::{PollPolicy, TaskController, DEFAULT_TIMEOUT_SECS};
use crate::payload::build_run_request;

/// Name of the credential the host must hold the API key under.
pub const CREDENTIAL_NAME: &str = "browserActApi";

/// Host-facing surface: the option loaders, the workflow field resolver and
/// `execute`, which turns each input item into one run and one output record.
#[derive(Clone)]
pub struct BrowserActNode {
    resolver: FieldResolver,
    controller: TaskController,
    default_timeout_secs: f64,
    continue_on_fail: bool,
}

impl BrowserActNode {
    pub fn new(client: TaskApiClient, policy: PollPolicy) -> Self {
        Self {
            resolver: FieldResolver::new(client.clone()),
            controller: TaskController::new(client, policy),
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
            continue_on_fail: false,
        }
    }

    pub fn with_default_timeout(mut self, secs: f64) -> Self {
        self.default_timeout_secs = secs;
        self
    }

    /// When set, a failing item yields `{"error": ...}` instead of aborting
    /// the remaining items.
    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }

    pub async fn get_agents(&self) -> Result<Vec<OptionEntry>, AdapterError> {
        let agents = self.resolver.list_agents().await?;
        Ok(agents.into_iter().map(OptionEntry::from).collect())
    }

    pub async fn get_workflows(&self) -> Result<Vec<OptionEntry>, AdapterError> {
        let workflows = self.resolver.list_workflows().await?;
        Ok(workflows.into_iter().map(OptionEntry::from).collect())
    }

    pub async fn get_workflow_inputs(
        &self,
        workflow_id: &str,
    ) -> Result<Vec<FieldSchemaEntry>, AdapterError> {
        self.resolver.get_workflow_field_schema(workflow_id).await
    }

    /// Items run one after another; each finishes its whole submit, poll and
    /// stop cycle before the next starts.
    pub async fn execute(&self, ctx: &dyn ExecutionContext) -> Result<Vec<Value>, AdapterError> {
        let count = ctx.item_count();
        let mut records = Vec::with_capacity(count);
        for item in 0..count {
            match self.execute_item(ctx, item).await {
                Ok(record) => records.push(record),
                Err(err) if self.continue_on_fail => {
                    tracing::warn!(
                        target: "browseract.node",
                        stage = "node.item.err",
                        item = item,
                        error = %err,
                        "item failed, continuing"
                    );
                    records.push(json!({ "error": err.to_string() }));
                }
                Err(err) => {
                    tracing::error!(
                        target: "browseract.node",
                        stage = "node.item.err",
                        item = item,
                        error = %err
                    );
                    return Err(err);
                }
            }
        }
        Ok(records)
    }

    async fn execute_item(
        &self,
        ctx: &dyn ExecutionContext,
        item: usize,
    ) -> Result<Value, AdapterError> {
        let mode = params::run_mode(ctx, item)?;
        let timeout = params::timeout_secs(ctx, item, self.default_timeout_secs);
        let raw = params::raw_fields(ctx, item, mode)?;
        let request = build_run_request(mode, &raw)?;
        tracing::debug!(
            target: "browseract.node",
            stage = "node.item.in",
            item = item,
            mode = %mode,
            body = %request.body()
        );
        let result = self.controller.run(&request, timeout).await?;
        Ok(result.into_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{status_err, ScriptedTransport};
    use crate::error::ValidationError;
    use crate::node::StaticContext;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn node(transport: Arc<ScriptedTransport>) -> BrowserActNode {
        BrowserActNode::new(TaskApiClient::new(transport), PollPolicy::default())
    }

    fn agent_item(task: &str) -> Value {
        json!({"resource": "agent", "operation": "runAgent", "agentId": "a1", "task": task, "timeout": 10})
    }

    #[tokio::test]
    async fn test_option_loaders_map_name_and_value() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(json!({"items": [{"id": "a1", "name": "Scraper"}]})),
            Ok(json!({"items": [{"id": "w1", "name": "Daily report"}]})),
        ]));
        let node = node(transport);
        assert_eq!(
            node.get_agents().await.unwrap(),
            vec![OptionEntry { name: "Scraper".into(), value: "a1".into() }]
        );
        assert_eq!(
            node.get_workflows().await.unwrap(),
            vec![OptionEntry { name: "Daily report".into(), value: "w1".into() }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_processes_every_item_in_order() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(json!({"id": "t1"})),
            Ok(json!({"id": "t1", "status": "finished"})),
            Ok(json!({"id": "t2"})),
            Ok(json!({"id": "t2", "status": "failed"})),
        ]));
        let ctx = StaticContext::from_value(json!([agent_item("one"), agent_item("two")])).unwrap();
        let records = node(transport.clone()).execute(&ctx).await.unwrap();

        assert_eq!(
            records,
            vec![
                json!({"id": "t1", "status": "finished"}),
                json!({"id": "t2", "status": "failed"}),
            ]
        );
        let bodies: Vec<Value> = transport
            .calls()
            .into_iter()
            .filter_map(|c| c.body)
            .collect();
        assert_eq!(
            bodies,
            vec![
                json!({"task": "one", "agent_id": "a1"}),
                json!({"task": "two", "agent_id": "a1"}),
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_validation_error_sends_nothing() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let ctx = StaticContext::from_value(json!({
            "resource": "workflow",
            "workflowId": "w1",
            "workflowConfig": {
                "value": {"input-url": ""},
                "schema": [
                    {"id": "input-url", "displayName": "url"},
                    {"id": "account-github", "displayName": "Account: github"}
                ]
            }
        }))
        .unwrap();
        let err = node(transport.clone()).execute(&ctx).await.unwrap_err();

        match err {
            AdapterError::Validation(v) => {
                assert_eq!(v.missing_fields(), ["url", "Account: github"])
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_execute_workflow_without_selection() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let ctx = StaticContext::from_value(json!({
            "resource": "workflow",
            "workflowId": "w1",
            "workflowConfig": {"value": null, "schema": []}
        }))
        .unwrap();
        let err = node(transport).execute(&ctx).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: Please select a workflow to run"
        );
    }

    #[tokio::test]
    async fn test_execute_reports_malformed_workflow_config() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let ctx = StaticContext::from_value(json!({
            "resource": "workflow",
            "workflowId": "w1",
            "workflowConfig": {"value": {"input-url": "x"}, "schema": [{"id": "input-url"}]}
        }))
        .unwrap();
        let err = node(transport.clone()).execute(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            AdapterError::Validation(ValidationError::MalformedWorkflowConfig(_))
        ));
        assert!(!err.to_string().contains("select a workflow"));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_continue_on_fail_records_error_and_moves_on() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            status_err(500),
            Ok(json!({})),
        ]));
        let ctx = StaticContext::from_value(json!([agent_item("one"), agent_item("two")])).unwrap();
        let records = node(transport)
            .with_continue_on_fail(true)
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0]["error"]
            .as_str()
            .unwrap_or_default()
            .contains("status=500"));
        assert_eq!(records[1], json!({"error": "Error"}));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_failure_aborts_without_continue_on_fail() {
        let transport = Arc::new(ScriptedTransport::new(vec![status_err(500)]));
        let ctx = StaticContext::from_value(json!([agent_item("one"), agent_item("two")])).unwrap();
        assert!(node(transport.clone()).execute(&ctx).await.is_err());
        assert_eq!(transport.calls().len(), 1);
    }
}
