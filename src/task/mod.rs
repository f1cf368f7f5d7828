pub mod manager;
pub mod runtime;
pub mod types;

#[cfg(test)]
mod tests;

pub use manager::ReportTaskManager;
pub use runtime::{ReportJob, TaskRuntime, TokioTaskRuntime};
pub use types::{RuntimeSnapshot, RuntimeState, TaskId, TaskPoll, TaskStatus};
