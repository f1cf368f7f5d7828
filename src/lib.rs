//! # Vinsight
//!
//! Vehicle-history report service core. Aggregates history data from
//! multiple third-party providers for a VIN, synthesizes the aggregate
//! into a structured report through an external text-generation service,
//! and exposes the whole pipeline as asynchronous tasks with a polling
//! protocol.
//!
//! ## Architecture Overview
//!
//! The system consists of several key components organized into modules:
//!
//! - **[`vin`]**: ISO 3779 VIN validation with check-digit arithmetic
//! - **[`provider`]**: Swappable vehicle-history data source clients
//! - **[`aggregator`]**: Concurrent fan-out over all configured providers
//! - **[`report`]**: Report synthesis, schema, and generation fallbacks
//! - **[`task`]**: Asynchronous task lifecycle with submit and poll
//!
//! ## Failure Philosophy
//!
//! Only VIN-format errors and unknown task ids fail a request. A
//! provider outage degrades the confidence score; a generation-service
//! outage or an unparsable completion degrades the report body. The
//! system always prefers returning something inspectable over a hard
//! failure.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vinsight::{AppConfig, ReportSynthesizer, ReportTaskManager, TokioTaskRuntime};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let synthesizer = ReportSynthesizer::from_config(&config)?;
//!     let manager = ReportTaskManager::new(
//!         Arc::new(synthesizer),
//!         Arc::new(TokioTaskRuntime::new()),
//!     );
//!
//!     let task_id = manager.submit("1HGBH41JXMN109186").await?;
//!     let poll = manager.poll(task_id).await?;
//!     println!("task {}: {:?}", task_id, poll.status);
//!     Ok(())
//! }
//! ```

/// ISO 3779 VIN validation.
///
/// Pure check-digit arithmetic plus the [`vin::Vin`] newtype that
/// carries proof of validation through the rest of the pipeline.
pub mod vin;

/// Environment-driven configuration, assembled once at startup and
/// injected into the other components.
pub mod config;

/// Request-level error taxonomy.
pub mod error;

/// Vehicle-history provider clients.
///
/// The [`provider::HistoryProvider`] trait plus the Carfax, ClearWin and
/// NHTSA implementations and a scriptable mock.
pub mod provider;

/// Concurrent multi-provider aggregation with partial-failure semantics.
pub mod aggregator;

/// Report synthesis: prompt construction, the structured report schema,
/// the text-generation seam, and degradation policy.
pub mod report;

/// Asynchronous task lifecycle: submit, poll, and the mapping from the
/// external runtime's states to the domain status vocabulary.
pub mod task;

// Re-export main types
pub use aggregator::{AggregatedData, DataAggregator, FetchStatus, ProviderResult};
pub use config::{AiConfig, AppConfig, ConfigError, ProviderSettings};
pub use error::ReportError;
pub use provider::{HistoryProvider, ProviderError};
pub use report::{Report, ReportBody, ReportSynthesizer, TextGenerator, VehicleReport};
pub use task::{ReportTaskManager, TaskId, TaskPoll, TaskRuntime, TaskStatus, TokioTaskRuntime};
pub use vin::{Vin, validate};

/// Initialize logging for binaries and services embedding the core.
///
/// Honors `RUST_LOG` when set, otherwise defaults to `vinsight=info`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vinsight=info")),
        )
        .init();
}
