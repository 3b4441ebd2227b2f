use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use serde_yaml::Value;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::kernel::constants::PLUGIN_METADATA_FILE;
use crate::plugin_system::descriptor::{DescriptorReader, PluginDescriptor};
use crate::plugin_system::error::DescriptorError;

/// Reads `plugin.yml` from the root of a ZIP-based plugin archive (`.jar`).
#[derive(Debug, Clone)]
pub struct JarDescriptorReader {
    metadata_file: String,
}

impl JarDescriptorReader {
    /// Create a reader looking for the default `plugin.yml`
    pub fn new() -> Self {
        Self::with_metadata_file(PLUGIN_METADATA_FILE)
    }

    /// Create a reader looking for a differently named metadata entry
    pub fn with_metadata_file(metadata_file: impl Into<String>) -> Self {
        Self {
            metadata_file: metadata_file.into(),
        }
    }

    pub fn metadata_file(&self) -> &str {
        &self.metadata_file
    }
}

impl Default for JarDescriptorReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DescriptorReader for JarDescriptorReader {
    async fn read_descriptor(&self, archive: &Path) -> Result<PluginDescriptor, DescriptorError> {
        let path = archive.to_path_buf();
        let metadata_file = self.metadata_file.clone();
        // ZIP parsing is synchronous; keep it off the async workers
        tokio::task::spawn_blocking(move || read_archive(&path, &metadata_file))
            .await
            .map_err(|e| DescriptorError::Unreadable {
                path: archive.to_path_buf(),
                reason: format!("archive read task did not complete: {}", e),
            })?
    }
}

fn read_archive(path: &Path, metadata_file: &str) -> Result<PluginDescriptor, DescriptorError> {
    let file = File::open(path).map_err(|e| DescriptorError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| DescriptorError::NotAnArchive {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut entry = match archive.by_name(metadata_file) {
        Ok(entry) if entry.is_file() => entry,
        Ok(_) | Err(ZipError::FileNotFound) => {
            return Err(DescriptorError::MetadataMissing {
                path: path.to_path_buf(),
                file: metadata_file.to_string(),
            });
        }
        Err(e) => {
            return Err(DescriptorError::NotAnArchive {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };
    debug!("Found {} in plugin file {}", metadata_file, path.display());

    let mut contents = String::new();
    entry
        .read_to_string(&mut contents)
        .map_err(|e| malformed(path, format!("could not read {}: {}", metadata_file, e)))?;

    parse_metadata(path, &contents)
}

/// Extracts the descriptor from the text of a `plugin.yml`.
///
/// `name` and `version` must be present as YAML scalars. Numeric versions such
/// as `version: 1.0` are kept in their textual form.
pub fn parse_metadata(path: &Path, contents: &str) -> Result<PluginDescriptor, DescriptorError> {
    if contents.trim().is_empty() {
        return Err(malformed(path, "metadata file is empty".to_string()));
    }

    let document: Value = serde_yaml::from_str(contents)
        .map_err(|e| malformed(path, format!("invalid YAML: {}", e)))?;
    if !document.is_mapping() {
        return Err(malformed(path, "metadata is not a YAML mapping".to_string()));
    }

    let name = scalar_field(&document, "name").ok_or_else(|| malformed(path, "missing 'name'".to_string()))?;
    let version = scalar_field(&document, "version")
        .ok_or_else(|| malformed(path, "missing 'version'".to_string()))?;

    Ok(PluginDescriptor::new(name, version))
}

fn scalar_field(document: &Value, key: &str) -> Option<String> {
    let text = match document.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn malformed(path: &Path, reason: String) -> DescriptorError {
    DescriptorError::MetadataMalformed {
        path: PathBuf::from(path),
        reason,
    }
}
