use std::fmt::Debug;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::storage::error::StorageResult;

/// Kind of filesystem entry, as seen after following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// The subset of file metadata the distribution core cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    pub kind: EntryKind,
    /// Size in bytes (0 for directories on most platforms)
    pub len: u64,
}

impl EntryMetadata {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Filesystem primitives consumed by discovery and distribution.
///
/// Every method is a suspension point; implementations must be safe to call
/// concurrently from independent pair evaluations.
#[async_trait]
pub trait StorageProvider: Send + Sync + Debug {
    /// Check if a path exists. Errors while checking count as "does not exist".
    async fn exists(&self, path: &Path) -> bool;

    /// Stat a path, following symlinks
    async fn metadata(&self, path: &Path) -> StorageResult<EntryMetadata>;

    /// List the immediate entries of a directory (non-recursive)
    async fn read_dir(&self, path: &Path) -> StorageResult<Vec<PathBuf>>;

    /// Create a directory and all its parents; succeeds if it already exists
    async fn create_dir_all(&self, path: &Path) -> StorageResult<()>;

    /// Copy a file byte-for-byte, replacing `to` if present. Returns bytes copied.
    async fn copy(&self, from: &Path, to: &Path) -> StorageResult<u64>;
}
