//! # plugsync Storage System Errors
//!
//! Defines [`StorageSystemError`], covering failures of the filesystem
//! primitives used by discovery and distribution (stat, listing, copy,
//! directory creation) and of settings-file loading.
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("{operation} failed on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// A blocking filesystem task or provider-specific step did not finish
    #[error("{operation} failed on '{}': {message}", display_optional(path.as_deref()))]
    OperationFailed {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Invalid path '{}': {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Unsupported settings file '{0}' (expected .json, .yaml, .yml or .toml)")]
    UnsupportedConfigFormat(String),

    #[error("Could not parse {format} settings: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Shorthand for results of storage operations
pub type StorageResult<T> = std::result::Result<T, StorageSystemError>;

impl StorageSystemError {
    /// Io error tagged with the operation name and the path it touched
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}

fn display_optional(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".into())
}
