use uuid::Uuid;

/// Request-level errors surfaced to callers of the core.
///
/// Only VIN-format errors and task lookups are true request failures.
/// Provider outages and generation failures are absorbed where they occur
/// and show up as degraded report data instead ([`crate::report::ReportBody`]).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReportError {
    #[error("invalid VIN format: {0}")]
    InvalidVin(String),
    #[error("task {0} not found")]
    TaskNotFound(Uuid),
    #[error("task execution failed: {0}")]
    TaskExecutionFailure(String),
    #[error("no history providers configured")]
    NoProvidersConfigured,
}
