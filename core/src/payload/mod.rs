mod builder;
pub mod models;

pub use builder::{build_agent_request, build_run_request, build_workflow_request, RawFields};
pub use models::{
    AgentRunPayload, CredentialEntry, InputParameter, RunMode, RunRequest, WorkflowInputs,
    WorkflowRunPayload,
};
