use serde_json::{json, Value};

use super::policy::PollPolicy;
use super::status::TaskStatus;
use crate::client::TaskApiClient;
use crate::error::AdapterError;
use crate::payload::RunRequest;

/// Value of the `error` key in records for runs that produced no task detail.
pub const ERROR_MARKER: &str = "Error";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    /// The service returned no task id for the submission.
    NotCreated,
    /// A poll observed a terminal status.
    Completed,
    /// The poll budget ran out; the task was stopped and fetched once more.
    Stopped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub task_id: Option<String>,
    pub phase: TaskPhase,
    pub attempts: u32,
    pub detail: Option<Value>,
}

impl TaskResult {
    /// The output record for the host: the task detail when one was fetched,
    /// otherwise an error marker carrying the task id.
    pub fn into_record(self) -> Value {
        match self.detail {
            Some(detail) => detail,
            None => match self.task_id {
                Some(task_id) => json!({ "error": ERROR_MARKER, "taskId": task_id }),
                None => json!({ "error": ERROR_MARKER }),
            },
        }
    }
}

/// Submits one run and drives it to a terminal status or the poll budget.
#[derive(Clone)]
pub struct TaskController {
    client: TaskApiClient,
    policy: PollPolicy,
}

impl TaskController {
    pub fn new(client: TaskApiClient, policy: PollPolicy) -> Self {
        Self { client, policy }
    }

    /// Any request failure other than the stop call aborts the run.
    pub async fn run(
        &self,
        request: &RunRequest,
        timeout_secs: f64,
    ) -> Result<TaskResult, AdapterError> {
        let mode = request.mode();
        let max_attempts = self.policy.max_attempts(timeout_secs);

        tracing::info!(
            target: "browseract.task",
            stage = "task.submit.in",
            mode = %mode,
            timeout_secs = timeout_secs,
            max_attempts = max_attempts
        );
        let response = self.client.run_task(mode, request.body()).await?;
        let Some(task_id) = task_id_of(&response) else {
            tracing::warn!(
                target: "browseract.task",
                stage = "task.submit.no_id",
                mode = %mode,
                "run-task response carried no task id"
            );
            return Ok(TaskResult {
                task_id: None,
                phase: TaskPhase::NotCreated,
                attempts: 0,
                detail: None,
            });
        };
        tracing::info!(
            target: "browseract.task",
            stage = "task.submit.out",
            mode = %mode,
            task_id = %task_id
        );

        for attempt in 1..=max_attempts {
            tokio::time::sleep(self.policy.delay).await;
            let detail = self.client.get_task(mode, &task_id).await?;
            let status = TaskStatus::of(&detail);
            tracing::debug!(
                target: "browseract.task",
                stage = "task.poll",
                task_id = %task_id,
                attempt = attempt,
                status = %status
            );
            if status.is_terminal() {
                tracing::info!(
                    target: "browseract.task",
                    stage = "task.completed",
                    task_id = %task_id,
                    attempts = attempt,
                    status = %status
                );
                return Ok(TaskResult {
                    task_id: Some(task_id),
                    phase: TaskPhase::Completed,
                    attempts: attempt,
                    detail: Some(detail),
                });
            }
        }

        tracing::warn!(
            target: "browseract.task",
            stage = "task.timeout",
            task_id = %task_id,
            attempts = max_attempts,
            "poll budget exhausted, stopping task"
        );
        if let Err(err) = self.client.stop_task(mode, &task_id).await {
            tracing::warn!(
                target: "browseract.task",
                stage = "task.stop.err",
                task_id = %task_id,
                error = %err,
                "stop-task failed, fetching final state anyway"
            );
        }
        let detail = self.client.get_task(mode, &task_id).await?;
        tracing::info!(
            target: "browseract.task",
            stage = "task.stopped",
            task_id = %task_id,
            status = %TaskStatus::of(&detail)
        );

        Ok(TaskResult {
            task_id: Some(task_id),
            phase: TaskPhase::Stopped,
            attempts: max_attempts,
            detail: (!detail.is_null()).then_some(detail),
        })
    }
}

fn task_id_of(response: &Value) -> Option<String> {
    match response.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
