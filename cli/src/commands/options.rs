use browseract_core::api::BrowserActNode;
use serde_json::json;

use super::cli::InputsArgs;
use super::print_json;
use crate::error::CliError;

pub async fn handle_agents(node: &BrowserActNode, pretty: bool) -> Result<(), CliError> {
    let agents = node.get_agents().await?;
    print_json(&json!(agents), pretty)
}

pub async fn handle_workflows(node: &BrowserActNode, pretty: bool) -> Result<(), CliError> {
    let workflows = node.get_workflows().await?;
    print_json(&json!(workflows), pretty)
}

pub async fn handle_inputs(
    node: &BrowserActNode,
    args: InputsArgs,
    pretty: bool,
) -> Result<(), CliError> {
    let fields = node.get_workflow_inputs(&args.workflow_id).await?;
    print_json(&json!({ "fields": fields }), pretty)
}
