use serde_json::Value;

use super::context::ExecutionContext;
use crate::error::ValidationError;
use crate::payload::{RawFields, RunMode, WorkflowInputs};

pub(crate) const RESOURCE: &str = "resource";
pub(crate) const OPERATION: &str = "operation";
pub(crate) const AGENT_ID: &str = "agentId";
pub(crate) const TASK: &str = "task";
pub(crate) const WORKFLOW_ID: &str = "workflowId";
pub(crate) const WORKFLOW_CONFIG: &str = "workflowConfig";
pub(crate) const TIMEOUT: &str = "timeout";

const RUN_AGENT: &str = "runAgent";
const RUN_WORKFLOW: &str = "runWorkflow";

fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Resource defaults to `agent`; the operation defaults to the resource's only one.
pub(crate) fn run_mode(ctx: &dyn ExecutionContext, item: usize) -> Result<RunMode, ValidationError> {
    let resource = text(ctx.node_parameter(RESOURCE, item)).unwrap_or_else(|| "agent".into());
    let operation = text(ctx.node_parameter(OPERATION, item));
    let (mode, expected) = match resource.as_str() {
        "agent" => (RunMode::Agent, RUN_AGENT),
        "workflow" => (RunMode::Workflow, RUN_WORKFLOW),
        _ => {
            return Err(ValidationError::UnsupportedOperation {
                operation: operation.unwrap_or_default(),
                resource,
            })
        }
    };
    match operation {
        Some(op) if op != expected => Err(ValidationError::UnsupportedOperation {
            resource,
            operation: op,
        }),
        _ => Ok(mode),
    }
}

/// A `workflowConfig` that is present but does not parse is reported as such
/// rather than as an unselected workflow.
pub(crate) fn raw_fields(
    ctx: &dyn ExecutionContext,
    item: usize,
    mode: RunMode,
) -> Result<RawFields, ValidationError> {
    let raw = match mode {
        RunMode::Agent => RawFields {
            agent_id: text(ctx.node_parameter(AGENT_ID, item)),
            task: text(ctx.node_parameter(TASK, item)),
            ..Default::default()
        },
        RunMode::Workflow => {
            let workflow_inputs = match ctx.node_parameter(WORKFLOW_CONFIG, item) {
                None | Some(Value::Null) => None,
                Some(v) => match serde_json::from_value::<WorkflowInputs>(v) {
                    Ok(inputs) => Some(inputs),
                    Err(err) => {
                        tracing::warn!(
                            target: "browseract.node",
                            item = item,
                            error = %err,
                            "workflowConfig is malformed"
                        );
                        return Err(ValidationError::MalformedWorkflowConfig(err.to_string()));
                    }
                },
            };
            RawFields {
                workflow_id: text(ctx.node_parameter(WORKFLOW_ID, item)),
                workflow_inputs,
                ..Default::default()
            }
        }
    };
    Ok(raw)
}

/// Missing, zero or non-numeric timeouts fall back to `default_secs`.
pub(crate) fn timeout_secs(ctx: &dyn ExecutionContext, item: usize, default_secs: f64) -> f64 {
    let parsed = match ctx.node_parameter(TIMEOUT, item) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|t| t.is_finite() && *t != 0.0)
        .unwrap_or(default_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::StaticContext;
    use serde_json::json;

    fn ctx(item: Value) -> StaticContext {
        StaticContext::from_value(item).unwrap()
    }

    #[test]
    fn test_run_mode_defaults_and_mismatch() {
        assert_eq!(run_mode(&ctx(json!({})), 0), Ok(RunMode::Agent));
        assert_eq!(
            run_mode(&ctx(json!({"resource": "workflow"})), 0),
            Ok(RunMode::Workflow)
        );
        assert_eq!(
            run_mode(&ctx(json!({"resource": "workflow", "operation": "runAgent"})), 0),
            Err(ValidationError::UnsupportedOperation {
                resource: "workflow".into(),
                operation: "runAgent".into(),
            })
        );
        assert!(run_mode(&ctx(json!({"resource": "browser"})), 0).is_err());
    }

    #[test]
    fn test_timeout_fallbacks() {
        assert_eq!(timeout_secs(&ctx(json!({"timeout": 30})), 0, 3600.0), 30.0);
        assert_eq!(timeout_secs(&ctx(json!({"timeout": "45"})), 0, 3600.0), 45.0);
        assert_eq!(timeout_secs(&ctx(json!({"timeout": 0})), 0, 3600.0), 3600.0);
        assert_eq!(timeout_secs(&ctx(json!({"timeout": "soon"})), 0, 3600.0), 3600.0);
        assert_eq!(timeout_secs(&ctx(json!({})), 0, 3600.0), 3600.0);
    }

    #[test]
    fn test_raw_fields_parses_workflow_config() {
        let c = ctx(json!({
            "workflowId": "w1",
            "workflowConfig": {
                "value": {"input-url": "https://example.com"},
                "schema": [{"id": "input-url", "displayName": "url"}]
            }
        }));
        let raw = raw_fields(&c, 0, RunMode::Workflow).unwrap();
        assert_eq!(raw.workflow_id.as_deref(), Some("w1"));
        let inputs = raw.workflow_inputs.unwrap();
        assert_eq!(inputs.schema.len(), 1);
        assert!(inputs.schema[0].required);
        assert_eq!(inputs.text("input-url").as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_raw_fields_rejects_unparseable_workflow_config() {
        let c = ctx(json!({
            "workflowId": "w1",
            "workflowConfig": {"value": {}, "schema": [{"id": "input-url"}]}
        }));
        match raw_fields(&c, 0, RunMode::Workflow) {
            Err(ValidationError::MalformedWorkflowConfig(msg)) => {
                assert!(msg.contains("displayName"), "{msg}")
            }
            other => panic!("expected malformed config, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_fields_null_workflow_config_is_absent() {
        let c = ctx(json!({"workflowId": "w1", "workflowConfig": null}));
        let raw = raw_fields(&c, 0, RunMode::Workflow).unwrap();
        assert!(raw.workflow_inputs.is_none());
    }
}
