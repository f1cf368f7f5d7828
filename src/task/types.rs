use crate::report::Report;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a submitted report task.
pub type TaskId = Uuid;

/// Domain-level task status exposed to pollers.
///
/// `Started` and `InProgress` are transient and may never be observed
/// when a poll lands after completion. `Completed` and `Failed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Started,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// Raw state vocabulary of the external queue runtime.
///
/// Kept fully isolated from [`TaskStatus`]; the only bridge between the
/// two is [`crate::task::manager::map_runtime_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeState {
    Pending,
    Started,
    Retry,
    Running,
    Success,
    Failure,
}

/// One read of the runtime's state for a task id.
#[derive(Debug, Clone)]
pub struct RuntimeSnapshot {
    pub state: RuntimeState,
    /// Serialized report, present only on `Success`.
    pub result: Option<serde_json::Value>,
    /// Failure description, present only on `Failure`.
    pub error: Option<String>,
}

impl RuntimeSnapshot {
    pub fn pending() -> Self {
        Self {
            state: RuntimeState::Pending,
            result: None,
            error: None,
        }
    }

    pub fn started() -> Self {
        Self {
            state: RuntimeState::Started,
            result: None,
            error: None,
        }
    }

    pub fn success(result: serde_json::Value) -> Self {
        Self {
            state: RuntimeState::Success,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            state: RuntimeState::Failure,
            result: None,
            error: Some(error),
        }
    }
}

/// Poll response returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPoll {
    pub message: String,
    pub status: TaskStatus,
    /// Populated only when `status` is `Completed`, reconstructed from
    /// the runtime's serialized result into the full report shape.
    pub result: Option<Report>,
}
