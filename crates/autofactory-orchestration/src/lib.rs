//! Incremental generation runs for autofactory
//!
//! Orders workspace modules by dependency, generates factories for every
//! module concurrently, skips targets whose source digest is unchanged,
//! removes generated files that no longer have a target, and persists the
//! digests of a successful run.

pub mod catalog;
pub mod error;
pub mod execution_ordering;
pub mod hash_store;
pub mod orchestrator;
pub mod reconciler;
pub mod report;

// Re-export public API
pub use catalog::GeneratedCatalog;
pub use error::{OrchestrationError, Result};
pub use execution_ordering::{ExecutionLevel, ExecutionOrderer, ExecutionPlan};
pub use hash_store::{default_state_file, digest, source_key, HashStore};
pub use orchestrator::{Orchestrator, OrchestratorOptions};
pub use reconciler::{reconcile, Reconciliation};
pub use report::{RunReport, RunStatistics, TargetReport, TargetState};
