//! # plugsync Distribution Errors
//!
//! [`ConfigError`] rejects a run configuration before the engine starts.
//! [`DistributionError`] lists the only conditions that abort a run; every
//! per-pair problem is recorded in that pair's outcome instead.
use thiserror::Error;

use crate::discovery::error::DiscoveryError;
use crate::discovery::resolver::PathSource;
use crate::discovery::validator::PathKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Both a single {kind} path and a {kind} directory were given; use exactly one")]
    ConflictingSources { kind: PathKind },

    #[error("No {kind} path or {kind} directory was given")]
    MissingSource { kind: PathKind },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("No server found in {origin}")]
    NoServersFound { origin: PathSource },

    #[error("No plugin found in {origin}")]
    NoPluginsFound { origin: PathSource },

    #[error("Path resolution failed: {0}")]
    PathResolutionFailed(#[from] DiscoveryError),
}
