use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;

use crate::storage::error::{StorageResult, StorageSystemError};

/// Settings file syntaxes, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    #[cfg(feature = "yaml-config")]
    Yaml,
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Human-readable name used in parse errors
    pub fn label(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "JSON",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "YAML",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "TOML",
        }
    }

    /// `.json`, `.yaml`/`.yml` or `.toml`, case-insensitive; formats compiled out yield `None`
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(ConfigFormat::Json),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            #[cfg(feature = "toml-config")]
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Persistent defaults for a run, loaded from an optional settings file.
///
/// Every field is optional; anything left unset falls back to the command
/// line and then to the built-in defaults in [`crate::kernel::constants`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Name of the staging folder inside each server's plugins directory
    pub update_folder: Option<String>,
    /// Recognized plugin archive suffix, e.g. ".jar"
    pub plugin_extension: Option<String>,
    /// Subdirectory that marks a server and holds its installed plugins
    pub plugins_folder: Option<String>,
    pub concurrency: Option<usize>,
    /// Directory of servers used when no server flag is given
    pub server_directory: Option<PathBuf>,
    /// Directory of plugin archives used when no plugin flag is given
    pub plugin_directory: Option<PathBuf>,
    pub strip_version_suffix: Option<bool>,
}

impl Settings {
    /// Parse settings from a string in the given format
    pub fn parse(contents: &str, format: ConfigFormat) -> StorageResult<Self> {
        match format {
            ConfigFormat::Json => {
                serde_json::from_str(contents).map_err(|e| deserialization_error(format, e))
            }
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                // An empty YAML document means "no overrides"
                if contents.trim().is_empty() {
                    return Ok(Self::default());
                }
                serde_yaml::from_str(contents).map_err(|e| deserialization_error(format, e))
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                toml::from_str(contents).map_err(|e| deserialization_error(format, e))
            }
        }
    }

    /// Load settings from a file, picking the format from its extension
    pub async fn load(path: &Path) -> StorageResult<Self> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            StorageSystemError::UnsupportedConfigFormat(path.display().to_string())
        })?;
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| StorageSystemError::io(e, "read_settings", path.to_path_buf()))?;
        Self::parse(&contents, format)
    }
}

fn deserialization_error(
    format: ConfigFormat,
    source: impl std::error::Error + Send + Sync + 'static,
) -> StorageSystemError {
    StorageSystemError::DeserializationError {
        format: format.label().to_string(),
        source: Box::new(source),
    }
}
