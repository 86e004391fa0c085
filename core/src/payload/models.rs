use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::FieldSchemaEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Agent,
    Workflow,
}

impl RunMode {
    /// Path segment selecting the agent or workflow task routes.
    pub fn route(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Workflow => "workflow",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRunPayload {
    pub task: String,
    pub agent_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputParameter {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRunPayload {
    pub workflow_id: String,
    pub input_parameters: Vec<InputParameter>,
    pub credentials: Vec<CredentialEntry>,
}

/// Validated submission for one input item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunRequest {
    Agent(AgentRunPayload),
    Workflow(WorkflowRunPayload),
}

impl RunRequest {
    pub fn mode(&self) -> RunMode {
        match self {
            Self::Agent(_) => RunMode::Agent,
            Self::Workflow(_) => RunMode::Workflow,
        }
    }

    /// JSON body for the mode's `run-task` endpoint.
    pub fn body(&self) -> Value {
        let out = match self {
            Self::Agent(p) => serde_json::to_value(p),
            Self::Workflow(p) => serde_json::to_value(p),
        };
        out.unwrap_or(Value::Null)
    }
}

/// The resource-mapper value the host stores for a workflow run: the user's
/// entries keyed by field id, plus the schema they were entered against.
/// `value` is `None` until a workflow has been picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowInputs {
    #[serde(default)]
    pub value: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub schema: Vec<FieldSchemaEntry>,
}

impl WorkflowInputs {
    /// Trimmed text entered for `id`. Numbers and booleans are accepted as
    /// their JSON text; empty strings, null and structured values are absent.
    pub fn text(&self, id: &str) -> Option<String> {
        let raw = match self.value.as_ref()?.get(id)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!raw.is_empty()).then_some(raw)
    }
}
