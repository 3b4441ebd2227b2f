use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::TryStreamExt;
use log::debug;
use tempfile::NamedTempFile;
use tokio::fs;
use tokio_stream::wrappers::ReadDirStream;

use crate::storage::error::{StorageResult, StorageSystemError};
use crate::storage::provider::{EntryKind, EntryMetadata, StorageProvider};

/// Local filesystem storage provider backed by `tokio::fs`
#[derive(Debug, Clone, Default)]
pub struct LocalStorageProvider;

impl LocalStorageProvider {
    /// Create a new local storage provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn exists(&self, path: &Path) -> bool {
        match fs::try_exists(path).await {
            Ok(exists) => exists,
            Err(e) => {
                debug!("Error checking existence of {}: {}", path.display(), e);
                false // Assume doesn't exist on error
            }
        }
    }

    async fn metadata(&self, path: &Path) -> StorageResult<EntryMetadata> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| StorageSystemError::io(e, "metadata", path.to_path_buf()))?;
        let kind = if meta.is_file() {
            EntryKind::File
        } else if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };
        Ok(EntryMetadata { kind, len: meta.len() })
    }

    async fn read_dir(&self, path: &Path) -> StorageResult<Vec<PathBuf>> {
        let read_dir = fs::read_dir(path)
            .await
            .map_err(|e| StorageSystemError::io(e, "read_dir", path.to_path_buf()))?;

        ReadDirStream::new(read_dir)
            .map_ok(|entry| entry.path())
            .try_collect()
            .await
            .map_err(|e| StorageSystemError::io(e, "read_dir_entry", path.to_path_buf()))
    }

    async fn create_dir_all(&self, path: &Path) -> StorageResult<()> {
        // create_dir_all already tolerates concurrent creation of the same directory
        fs::create_dir_all(path)
            .await
            .map_err(|e| StorageSystemError::io(e, "create_dir_all", path.to_path_buf()))
    }

    async fn copy(&self, from: &Path, to: &Path) -> StorageResult<u64> {
        let (from, to) = (from.to_path_buf(), to.to_path_buf());
        let target = to.clone();
        tokio::task::spawn_blocking(move || copy_atomically(&from, &to))
            .await
            .map_err(|e| StorageSystemError::OperationFailed {
                operation: "copy".to_string(),
                path: Some(target),
                message: format!("copy task did not complete: {}", e),
            })?
    }
}

/// Copies `from` into a temporary file beside `to`, then renames it into place.
fn copy_atomically(from: &Path, to: &Path) -> StorageResult<u64> {
    let parent = to.parent().ok_or_else(|| StorageSystemError::InvalidPath {
        path: to.to_path_buf(),
        reason: "destination has no parent directory".to_string(),
    })?;

    let mut source = File::open(from)
        .map_err(|e| StorageSystemError::io(e, "open_source", from.to_path_buf()))?;
    let permissions = source
        .metadata()
        .map_err(|e| StorageSystemError::io(e, "metadata", from.to_path_buf()))?
        .permissions();

    let mut temp_file = NamedTempFile::new_in(parent)
        .map_err(|e| StorageSystemError::io(e, "create_temp_file", parent.to_path_buf()))?;

    let bytes = io::copy(&mut source, temp_file.as_file_mut())
        .map_err(|e| StorageSystemError::io(e, "write_to_temp_file", temp_file.path().to_path_buf()))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| StorageSystemError::io(e, "sync_temp_file", temp_file.path().to_path_buf()))?;
    std::fs::set_permissions(temp_file.path(), permissions)
        .map_err(|e| StorageSystemError::io(e, "set_permissions", temp_file.path().to_path_buf()))?;

    // Persist the temporary file, atomically replacing the target file
    temp_file
        .persist(to)
        .map_err(|e| StorageSystemError::io(e.error, "persist_temp_file", to.to_path_buf()))?;

    Ok(bytes)
}
