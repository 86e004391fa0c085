use browseract_core::api::{BrowserActNode, ExecutionContext, StaticContext};
use serde_json::{json, Map, Value};

use super::cli::{ExecuteArgs, RunAgentArgs, RunWorkflowArgs};
use super::print_json;
use crate::error::CliError;

pub async fn handle_run_agent(
    node: &BrowserActNode,
    args: RunAgentArgs,
    pretty: bool,
) -> Result<(), CliError> {
    let mut item = Map::new();
    item.insert("resource".into(), json!("agent"));
    item.insert("operation".into(), json!("runAgent"));
    item.insert("agentId".into(), json!(args.agent_id));
    item.insert("task".into(), json!(args.task));
    if let Some(timeout) = args.timeout {
        item.insert("timeout".into(), json!(timeout));
    }
    run_items(node, &StaticContext::single(item), pretty).await
}

/// Fetches the workflow's field list first so the submitted config carries
/// the same schema the user would have been shown.
pub async fn handle_run_workflow(
    node: &BrowserActNode,
    args: RunWorkflowArgs,
    pretty: bool,
) -> Result<(), CliError> {
    let values = parse_fields(&args.fields)?;
    let schema = node.get_workflow_inputs(&args.workflow_id).await?;
    for id in values.keys() {
        if !schema.iter().any(|f| &f.id == id) {
            tracing::warn!(
                target: "browseract.cli",
                field = %id,
                workflow_id = %args.workflow_id,
                "field is not declared by the workflow and will be ignored"
            );
        }
    }
    let mut item = Map::new();
    item.insert("resource".into(), json!("workflow"));
    item.insert("operation".into(), json!("runWorkflow"));
    item.insert("workflowId".into(), json!(args.workflow_id));
    item.insert(
        "workflowConfig".into(),
        json!({ "value": values, "schema": schema }),
    );
    if let Some(timeout) = args.timeout {
        item.insert("timeout".into(), json!(timeout));
    }
    run_items(node, &StaticContext::single(item), pretty).await
}

pub async fn handle_execute(
    node: BrowserActNode,
    args: ExecuteArgs,
    pretty: bool,
) -> Result<(), CliError> {
    let raw = tokio::fs::read_to_string(&args.items).await?;
    let value: Value = serde_json::from_str(&raw)
        .map_err(|e| CliError::Input(format!("{}: {}", args.items.display(), e)))?;
    let ctx = StaticContext::from_value(value)
        .map_err(CliError::Input)?
        .with_defaults(item_defaults(&args));
    let node = node.with_continue_on_fail(args.continue_on_fail);
    run_items(&node, &ctx, pretty).await
}

async fn run_items(
    node: &BrowserActNode,
    ctx: &dyn ExecutionContext,
    pretty: bool,
) -> Result<(), CliError> {
    tracing::info!(target: "browseract.cli", items = ctx.item_count(), "executing");
    for record in node.execute(ctx).await? {
        print_json(&record, pretty)?;
    }
    Ok(())
}

/// Values applied to every item of an items file that does not set them.
fn item_defaults(args: &ExecuteArgs) -> Map<String, Value> {
    let mut defaults = Map::new();
    if let Some(timeout) = args.timeout {
        defaults.insert("timeout".into(), json!(timeout));
    }
    defaults
}

fn parse_fields(fields: &[String]) -> Result<Map<String, Value>, CliError> {
    let mut out = Map::new();
    for raw in fields {
        let Some((id, value)) = raw.split_once('=') else {
            return Err(CliError::Input(format!(
                "field '{}' must look like FIELD_ID=VALUE",
                raw
            )));
        };
        let id = id.trim();
        if id.is_empty() {
            return Err(CliError::Input(format!("field '{}' has an empty id", raw)));
        }
        out.insert(id.to_string(), Value::String(value.to_string()));
    }
    Ok(out)
}
