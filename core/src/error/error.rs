use serde_json::Value;
use thiserror::Error;

use super::transport::TransportError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a workflow to run")]
    WorkflowNotSelected,
    #[error("Please fill in the required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("unsupported operation '{operation}' for resource '{resource}'")]
    UnsupportedOperation { resource: String, operation: String },
    #[error("workflowConfig is malformed: {0}")]
    MalformedWorkflowConfig(String),
}

impl ValidationError {
    /// Display names of the fields that were left empty, if any.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            Self::MissingFields(fields) => fields,
            _ => &[],
        }
    }
}

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("api error: {message}")]
    Api { message: String, response: Value },
    #[error("{0}")]
    Transport(#[from] TransportError),
}

impl AdapterError {
    pub fn api(message: impl Into<String>, response: Value) -> Self {
        Self::Api {
            message: message.into(),
            response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_every_field() {
        let err = ValidationError::MissingFields(vec!["url".into(), "Account: github".into()]);
        assert_eq!(
            err.to_string(),
            "Please fill in the required fields: url, Account: github"
        );
        assert_eq!(err.missing_fields().len(), 2);
    }

    #[test]
    fn test_workflow_not_selected_message() {
        let err: AdapterError = ValidationError::WorkflowNotSelected.into();
        assert_eq!(
            err.to_string(),
            "validation error: Please select a workflow to run"
        );
    }
}
