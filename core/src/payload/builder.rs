use super::models::{
    AgentRunPayload, CredentialEntry, InputParameter, RunMode, RunRequest, WorkflowInputs,
    WorkflowRunPayload,
};
use crate::error::ValidationError;
use crate::fields::FieldKind;

/// User-supplied values for one input item, as read from the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    pub agent_id: Option<String>,
    pub task: Option<String>,
    pub workflow_id: Option<String>,
    pub workflow_inputs: Option<WorkflowInputs>,
}

pub fn build_run_request(mode: RunMode, raw: &RawFields) -> Result<RunRequest, ValidationError> {
    match mode {
        RunMode::Agent => build_agent_request(raw.agent_id.as_deref(), raw.task.as_deref()),
        RunMode::Workflow => {
            build_workflow_request(raw.workflow_id.as_deref(), raw.workflow_inputs.as_ref())
        }
    }
}

pub fn build_agent_request(
    agent_id: Option<&str>,
    task: Option<&str>,
) -> Result<RunRequest, ValidationError> {
    let agent_id = agent_id.map(str::trim).filter(|s| !s.is_empty());
    let task = task.map(str::trim).filter(|s| !s.is_empty());

    let mut missing = Vec::new();
    if agent_id.is_none() {
        missing.push("Agent".to_string());
    }
    if task.is_none() {
        missing.push("Task".to_string());
    }

    match (agent_id, task) {
        (Some(agent_id), Some(task)) => Ok(RunRequest::Agent(AgentRunPayload {
            task: task.to_string(),
            agent_id: agent_id.to_string(),
        })),
        _ => Err(ValidationError::MissingFields(missing)),
    }
}

/// Validates every declared field before failing, so the error names all of
/// the empty ones at once.
pub fn build_workflow_request(
    workflow_id: Option<&str>,
    inputs: Option<&WorkflowInputs>,
) -> Result<RunRequest, ValidationError> {
    let workflow_id = workflow_id.map(str::trim).filter(|s| !s.is_empty());
    let (Some(workflow_id), Some(inputs)) = (workflow_id, inputs) else {
        return Err(ValidationError::WorkflowNotSelected);
    };
    if inputs.value.is_none() {
        return Err(ValidationError::WorkflowNotSelected);
    }

    let mut missing = Vec::new();
    let mut input_parameters = Vec::new();
    let mut credentials: Vec<CredentialEntry> = Vec::new();

    for entry in &inputs.schema {
        let Some(value) = inputs.text(&entry.id) else {
            missing.push(entry.display_name.clone());
            continue;
        };
        match entry.kind() {
            Some((FieldKind::Input, name)) => input_parameters.push(InputParameter {
                name: name.to_string(),
                value,
            }),
            Some((kind, platform)) => {
                let idx = match credentials.iter().position(|c| c.platform == platform) {
                    Some(idx) => idx,
                    None => {
                        credentials.push(CredentialEntry {
                            platform: platform.to_string(),
                            account: None,
                            password: None,
                        });
                        credentials.len() - 1
                    }
                };
                if kind == FieldKind::Account {
                    credentials[idx].account = Some(value);
                } else {
                    credentials[idx].password = Some(value);
                }
            }
            None => {
                tracing::debug!(
                    target: "browseract.payload",
                    field = %entry.id,
                    "ignoring field with unknown prefix"
                );
            }
        }
    }

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    Ok(RunRequest::Workflow(WorkflowRunPayload {
        workflow_id: workflow_id.to_string(),
        input_parameters,
        credentials,
    }))
}
