use serde_json::Value;

use super::types::{FieldSchemaEntry, ResourceSummary};
use crate::client::TaskApiClient;
use crate::error::AdapterError;

/// Node type marking the workflow's declared inputs in its DSL.
pub const INPUT_PARAMETERS_NODE: &str = "INPUT_PARAMETERS";

/// Feeds dropdowns and the per-workflow field list.
#[derive(Clone)]
pub struct FieldResolver {
    client: TaskApiClient,
}

impl FieldResolver {
    pub fn new(client: TaskApiClient) -> Self {
        Self { client }
    }

    pub async fn list_agents(&self) -> Result<Vec<ResourceSummary>, AdapterError> {
        let response = self.client.list_agents().await?;
        let out = match response.get("items").and_then(Value::as_array) {
            Some(items) => parse_summaries(items),
            None => {
                tracing::error!(
                    target: "browseract.fields",
                    stage = "fields.agents.invalid",
                    "agent list response has no items array"
                );
                return Err(AdapterError::api(
                    "agent list response must carry an items array",
                    response.clone(),
                ));
            }
        };
        tracing::debug!(target: "browseract.fields", stage = "fields.agents.out", agents = out.len());
        Ok(out)
    }

    /// A missing `items` key is an empty listing; a non-array one is rejected
    /// the same way agent listings are.
    pub async fn list_workflows(&self) -> Result<Vec<ResourceSummary>, AdapterError> {
        let response = self.client.list_workflows().await?;
        let out = match response.get("items") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => parse_summaries(items),
            Some(_) => {
                return Err(AdapterError::api(
                    "workflow list response must carry an items array",
                    response.clone(),
                ))
            }
        };
        tracing::debug!(
            target: "browseract.fields",
            stage = "fields.workflows.out",
            workflows = out.len()
        );
        Ok(out)
    }

    pub async fn get_workflow_field_schema(
        &self,
        workflow_id: &str,
    ) -> Result<Vec<FieldSchemaEntry>, AdapterError> {
        let config = self.client.get_workflow_config(workflow_id).await?;
        let fields = field_schema_from_config(&config);
        tracing::debug!(
            target: "browseract.fields",
            stage = "fields.schema.out",
            workflow_id = %workflow_id,
            fields = fields.len()
        );
        Ok(fields)
    }
}

/// Reads the input-parameter and credential declarations out of a workflow
/// config. Anything missing or malformed yields fewer fields, never an error.
pub fn field_schema_from_config(config: &Value) -> Vec<FieldSchemaEntry> {
    let properties = config
        .pointer("/dsl/nodes")
        .and_then(Value::as_array)
        .and_then(|nodes| {
            nodes
                .iter()
                .find(|node| node.get("type").and_then(Value::as_str) == Some(INPUT_PARAMETERS_NODE))
        })
        .and_then(|node| node.get("properties"));
    let Some(properties) = properties else {
        return Vec::new();
    };

    let declared = |key: &str, attr: &str| -> Vec<String> {
        properties
            .get(key)
            .and_then(|p| p.get("value"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get(attr).and_then(Value::as_str))
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    let mut fields: Vec<FieldSchemaEntry> = declared("input_parameters", "name")
        .iter()
        .map(|name| FieldSchemaEntry::input(name))
        .collect();
    for platform in declared("credentials", "platform") {
        fields.push(FieldSchemaEntry::password(&platform));
        fields.push(FieldSchemaEntry::account(&platform));
    }
    fields
}

fn parse_summaries(items: &[Value]) -> Vec<ResourceSummary> {
    items
        .iter()
        .filter_map(|item| {
            let id = match item.get("id") {
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    tracing::warn!(target: "browseract.fields", "skipping listed item without id");
                    return None;
                }
            };
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(&id)
                .to_string();
            Some(ResourceSummary { id, name })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{status_err, ScriptedTransport};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn resolver(responses: Vec<Result<Value, crate::error::TransportError>>) -> FieldResolver {
        let transport = Arc::new(ScriptedTransport::new(responses));
        FieldResolver::new(TaskApiClient::new(transport))
    }

    fn workflow_config() -> Value {
        json!({
            "dsl": {
                "nodes": [
                    {"type": "START", "properties": {}},
                    {
                        "type": "INPUT_PARAMETERS",
                        "properties": {
                            "input_parameters": {"value": [{"name": "url"}, {"name": "keyword"}]},
                            "credentials": {"value": [{"platform": "github"}, {"platform": "gmail"}]}
                        }
                    }
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_list_agents_maps_items() {
        let r = resolver(vec![Ok(json!({"items": [
            {"id": "a1", "name": "Scraper"},
            {"id": 42, "name": "Numeric"},
            {"name": "no id"}
        ]}))]);
        let agents = r.list_agents().await.unwrap();
        assert_eq!(
            agents,
            vec![
                ResourceSummary { id: "a1".into(), name: "Scraper".into() },
                ResourceSummary { id: "42".into(), name: "Numeric".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_agents_rejects_non_array_items() {
        let r = resolver(vec![Ok(json!({"items": "not-an-array"}))]);
        match r.list_agents().await {
            Err(AdapterError::Api { response, .. }) => {
                assert_eq!(response, json!({"items": "not-an-array"}))
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_workflows_tolerates_missing_items() {
        let r = resolver(vec![Ok(json!({}))]);
        assert!(r.list_workflows().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_workflows_rejects_non_array_items() {
        let r = resolver(vec![Ok(json!({"items": {"id": "w"}}))]);
        assert!(matches!(
            r.list_workflows().await,
            Err(AdapterError::Api { .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let r = resolver(vec![status_err(401)]);
        assert!(matches!(
            r.list_agents().await,
            Err(AdapterError::Transport(_))
        ));
    }

    #[test]
    fn test_schema_inputs_then_credential_pairs() {
        let ids: Vec<String> = field_schema_from_config(&workflow_config())
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "input-url",
                "input-keyword",
                "password-github",
                "account-github",
                "password-gmail",
                "account-gmail",
            ]
        );
    }

    #[test]
    fn test_schema_degrades_to_empty() {
        assert!(field_schema_from_config(&json!({})).is_empty());
        assert!(field_schema_from_config(&json!({"dsl": {"nodes": "x"}})).is_empty());
        assert!(field_schema_from_config(&json!({"dsl": {"nodes": [
            {"type": "INPUT_PARAMETERS", "properties": {"input_parameters": {"value": 3}}}
        ]}}))
        .is_empty());
    }

    #[tokio::test]
    async fn test_schema_is_stable_across_calls() {
        let r = resolver(vec![Ok(workflow_config()), Ok(workflow_config())]);
        let first = r.get_workflow_field_schema("wf").await.unwrap();
        let second = r.get_workflow_field_schema("wf").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }
}
