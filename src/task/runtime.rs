//! Task execution runtime abstraction.
//!
//! The manager observes externally-owned task state; it never force-sets
//! transitions. [`TaskRuntime`] is the seam for that external runtime,
//! and [`TokioTaskRuntime`] is the in-process implementation backed by
//! the tokio worker pool. A durable queue (Redis, a database) would slot
//! in behind the same trait.

use crate::task::types::{RuntimeSnapshot, TaskId};
use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

/// A unit of work producing a serialized report, or a failure message.
pub type ReportJob = BoxFuture<'static, Result<serde_json::Value, String>>;

#[async_trait]
pub trait TaskRuntime: Send + Sync {
    /// Submit a unit of work and return its identifier immediately.
    ///
    /// The id must read as pending from `state_of` before this returns,
    /// so a caller polling a freshly submitted task can never see it as
    /// unknown.
    async fn submit(&self, job: ReportJob) -> TaskId;

    /// Read the runtime's current state for an id. `None` means the id
    /// is genuinely unrecognized, not merely unstarted.
    async fn state_of(&self, task_id: TaskId) -> Option<RuntimeSnapshot>;
}

/// In-process runtime: tasks run on the tokio worker pool and state
/// lives in a concurrent map.
#[derive(Default)]
pub struct TokioTaskRuntime {
    states: Arc<DashMap<TaskId, RuntimeSnapshot>>,
}

impl TokioTaskRuntime {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRuntime for TokioTaskRuntime {
    async fn submit(&self, job: ReportJob) -> TaskId {
        let task_id = Uuid::new_v4();
        // Recorded before the worker is spawned; closes the race where a
        // just-submitted id would read as not-found.
        self.states.insert(task_id, RuntimeSnapshot::pending());

        let states = Arc::clone(&self.states);
        tokio::spawn(async move {
            states.insert(task_id, RuntimeSnapshot::started());
            debug!("Task {} started", task_id);

            // The inner spawn turns a panic in the job into a join error
            // instead of killing the state update below.
            let snapshot = match tokio::spawn(job).await {
                Ok(Ok(result)) => RuntimeSnapshot::success(result),
                Ok(Err(message)) => {
                    error!("Task {} failed: {}", task_id, message);
                    RuntimeSnapshot::failure(message)
                }
                Err(join_error) => {
                    error!("Task {} worker panicked: {}", task_id, join_error);
                    RuntimeSnapshot::failure(format!("worker panicked: {join_error}"))
                }
            };
            states.insert(task_id, snapshot);
        });

        task_id
    }

    async fn state_of(&self, task_id: TaskId) -> Option<RuntimeSnapshot> {
        self.states.get(&task_id).map(|entry| entry.value().clone())
    }
}
