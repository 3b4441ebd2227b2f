//! # plugsync Plugin System Errors
//!
//! [`DescriptorError`] covers every way reading a plugin archive's embedded
//! metadata can fail. Errors are cloneable so one failed read can be shared
//! by every server paired with the same plugin.
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("Could not open plugin file '{path}': {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("'{path}' is not a readable plugin archive: {reason}")]
    NotAnArchive { path: PathBuf, reason: String },

    #[error("Plugin archive '{path}' contains no {file}")]
    MetadataMissing { path: PathBuf, file: String },

    #[error("Plugin archive '{path}' has invalid metadata: {reason}")]
    MetadataMalformed { path: PathBuf, reason: String },
}
