use std::fmt;

use serde_json::Value;

/// Remote task status. Anything not listed is an in-progress state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Finished,
    Canceled,
    Paused,
    Failed,
    Other(String),
}

impl TaskStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "running" => Self::Running,
            "finished" => Self::Finished,
            "canceled" => Self::Canceled,
            "paused" => Self::Paused,
            "failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Status of a task detail record; missing or non-string is `Other("")`.
    pub fn of(detail: &Value) -> Self {
        Self::parse(detail.get("status").and_then(Value::as_str).unwrap_or_default())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Finished | Self::Canceled | Self::Paused | Self::Failed
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Canceled => "canceled",
            Self::Paused => "paused",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
