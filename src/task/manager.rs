//! Asynchronous report task management.
//!
//! Wraps report synthesis as a unit of work with a durable identifier:
//! `submit` validates the VIN and enqueues without blocking on the
//! synthesis, `poll` reads the runtime's state and maps it into the
//! stable domain status vocabulary.

use crate::error::ReportError;
use crate::report::{Report, ReportSynthesizer};
use crate::task::runtime::TaskRuntime;
use crate::task::types::{RuntimeSnapshot, RuntimeState, TaskId, TaskPoll, TaskStatus};
use crate::vin::Vin;
use std::sync::Arc;
use tracing::info;

/// Map an external runtime state into the domain status and its poll
/// message. This is the only place the runtime vocabulary is interpreted.
pub(crate) fn map_runtime_state(state: RuntimeState) -> (TaskStatus, &'static str) {
    match state {
        RuntimeState::Pending => (TaskStatus::Pending, "Task is pending"),
        RuntimeState::Started => (TaskStatus::Started, "Task started"),
        RuntimeState::Retry => (TaskStatus::InProgress, "Task is retrying"),
        RuntimeState::Running => (TaskStatus::InProgress, "Task is in progress"),
        RuntimeState::Success => (TaskStatus::Completed, "Task completed successfully"),
        RuntimeState::Failure => (TaskStatus::Failed, "Task failed"),
    }
}

pub struct ReportTaskManager {
    synthesizer: Arc<ReportSynthesizer>,
    runtime: Arc<dyn TaskRuntime>,
}

impl ReportTaskManager {
    pub fn new(synthesizer: Arc<ReportSynthesizer>, runtime: Arc<dyn TaskRuntime>) -> Self {
        Self {
            synthesizer,
            runtime,
        }
    }

    /// Validate the VIN and enqueue report synthesis.
    ///
    /// Fails fast with [`ReportError::InvalidVin`] before any work is
    /// enqueued; otherwise returns the task id immediately without
    /// waiting on the synthesis.
    pub async fn submit(&self, raw_vin: &str) -> Result<TaskId, ReportError> {
        let vin = Vin::new(raw_vin)?;

        let synthesizer = Arc::clone(&self.synthesizer);
        let job_vin = vin.clone();
        let job = Box::pin(async move {
            let report = synthesizer.synthesize(&job_vin).await;
            serde_json::to_value(&report).map_err(|e| format!("failed to serialize report: {e}"))
        });

        let task_id = self.runtime.submit(job).await;
        info!("Submitted report task {} for VIN {}", task_id, vin);
        Ok(task_id)
    }

    /// Look up a task's current status.
    ///
    /// An id the runtime does not recognize is [`ReportError::TaskNotFound`];
    /// a recognized-but-unstarted task reads as pending. The stored
    /// result is reconstructed into the full [`Report`] shape, never
    /// handed back as an untyped blob.
    pub async fn poll(&self, task_id: TaskId) -> Result<TaskPoll, ReportError> {
        let snapshot = self
            .runtime
            .state_of(task_id)
            .await
            .ok_or(ReportError::TaskNotFound(task_id))?;

        let (status, default_message) = map_runtime_state(snapshot.state);
        let message = match (&snapshot, status) {
            (
                RuntimeSnapshot {
                    error: Some(error), ..
                },
                TaskStatus::Failed,
            ) => error.clone(),
            _ => default_message.to_string(),
        };

        let result = if status == TaskStatus::Completed {
            let value = snapshot.result.ok_or_else(|| {
                ReportError::TaskExecutionFailure(format!(
                    "task {task_id} completed without a stored result"
                ))
            })?;
            let report: Report = serde_json::from_value(value).map_err(|e| {
                ReportError::TaskExecutionFailure(format!(
                    "task {task_id} result failed to deserialize: {e}"
                ))
            })?;
            Some(report)
        } else {
            None
        };

        Ok(TaskPoll {
            message,
            status,
            result,
        })
    }
}
