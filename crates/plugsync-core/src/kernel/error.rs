//! # plugsync Core Kernel Errors
//!
//! Defines the crate-wide [`Error`] type.
//!
//! Each subsystem owns a typed error enum; this module folds them into one
//! type so callers that drive a whole run (the CLI) can use a single `Result`.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::discovery::error::DiscoveryError;
use crate::distribution::error::{ConfigError, DistributionError};
use crate::plugin_system::error::DescriptorError;
use crate::plugin_system::version::VersionError;
use crate::storage::error::StorageSystemError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Filesystem or settings-file failure
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Malformed semantic version
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Plugin archive metadata could not be read
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Server or plugin path resolution failed
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Invalid run configuration, rejected before the engine starts
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fatal, run-aborting condition
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

