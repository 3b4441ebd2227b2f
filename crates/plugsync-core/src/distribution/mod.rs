//! # plugsync Distribution
//!
//! The reconciliation and distribution core.
//!
//! - **[`context`]**: [`RunConfiguration`] and its builder, [`ExecutionMode`]
//!   and [`FileNaming`].
//! - **[`eligibility`]**: [`EligibilityChecker`] owns the "is it installed,
//!   is it the same plugin, is it newer" policy for one pair.
//! - **[`engine`]**: [`DistributionEngine`] resolves both sides concurrently,
//!   fans out over the plugin x server cross product and aggregates a
//!   [`RunResult`].
//! - **[`outcome`]**: per-pair decisions and transfers, plus the run summary.
//! - **[`dry_run`]**: copy records produced instead of copies in simulate mode.
//! - **[`error`]**: [`ConfigError`](error::ConfigError) and
//!   [`DistributionError`](error::DistributionError).
pub mod context;
pub mod dry_run;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod outcome;

pub use context::{ExecutionMode, FileNaming, RunConfiguration, RunConfigurationBuilder};
pub use dry_run::{DryRunReport, DryRunnable, FileOperation, FileOperationType};
pub use eligibility::{EligibilityChecker, SourceDescriptorCache};
pub use engine::{DistributionEngine, RunPhase};
pub use error::{ConfigError, DistributionError};
pub use outcome::{PairOutcome, PairStatus, RunResult, RunSummary, TransferOutcome, UpdateDecision};

#[cfg(test)]
mod tests;
