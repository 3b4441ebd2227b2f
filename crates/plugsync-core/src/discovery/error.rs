//! # plugsync Discovery Errors
//!
//! Only an unreadable base directory is an error here. Entries that fail
//! validation are dropped silently by the resolver.
use std::path::PathBuf;
use thiserror::Error;

use crate::discovery::validator::PathKind;
use crate::storage::error::StorageSystemError;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Cannot read {kind} directory '{path}': {source}")]
    DirectoryRead {
        kind: PathKind,
        path: PathBuf,
        #[source]
        source: StorageSystemError,
    },
}
