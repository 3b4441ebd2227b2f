use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::kernel::constants::{DEFAULT_PLUGIN_EXTENSION, DEFAULT_PLUGINS_DIR};
use crate::storage::StorageProvider;
use crate::utils::fs::file_name_of;

/// What a candidate path is being validated as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    Server,
    Plugin,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::Server => write!(f, "server"),
            PathKind::Plugin => write!(f, "plugin"),
        }
    }
}

/// A directory confirmed to contain a plugins subdirectory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServerPath(PathBuf);

impl ServerPath {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// `<server>/<plugins_folder>`
    pub fn plugins_dir(&self, plugins_folder: &str) -> PathBuf {
        self.0.join(plugins_folder)
    }
}

impl fmt::Display for ServerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A non-empty regular file carrying the recognized archive suffix
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginPath {
    path: PathBuf,
    file_name: String,
}

impl PluginPath {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = file_name_of(&path)?;
        Some(Self { path, file_name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Basename including the extension
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl fmt::Display for PluginPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// A path that passed validation, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedPath {
    Server(ServerPath),
    Plugin(PluginPath),
}

impl ValidatedPath {
    pub fn path(&self) -> &Path {
        match self {
            ValidatedPath::Server(server) => server.path(),
            ValidatedPath::Plugin(plugin) => plugin.path(),
        }
    }

    pub fn kind(&self) -> PathKind {
        match self {
            ValidatedPath::Server(_) => PathKind::Server,
            ValidatedPath::Plugin(_) => PathKind::Plugin,
        }
    }
}

/// Decides whether a single path qualifies as a server directory or plugin file.
///
/// Validation never fails: any stat error is logged and treated as "does not
/// qualify", so one bad entry cannot spoil a bulk directory scan.
#[derive(Debug, Clone)]
pub struct PathValidator {
    storage: Arc<dyn StorageProvider>,
    plugins_folder: String,
    plugin_extension: String,
}

impl PathValidator {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            storage,
            plugins_folder: DEFAULT_PLUGINS_DIR.to_string(),
            plugin_extension: DEFAULT_PLUGIN_EXTENSION.to_string(),
        }
    }

    pub fn with_plugins_folder(mut self, plugins_folder: impl Into<String>) -> Self {
        self.plugins_folder = plugins_folder.into();
        self
    }

    pub fn with_plugin_extension(mut self, plugin_extension: impl Into<String>) -> Self {
        self.plugin_extension = plugin_extension.into();
        self
    }

    pub fn storage(&self) -> &dyn StorageProvider {
        self.storage.as_ref()
    }

    pub fn plugins_folder(&self) -> &str {
        &self.plugins_folder
    }

    pub fn plugin_extension(&self) -> &str {
        &self.plugin_extension
    }

    pub async fn validate(&self, kind: PathKind, path: &Path) -> Option<ValidatedPath> {
        match kind {
            PathKind::Server => self.validate_server(path).await.map(ValidatedPath::Server),
            PathKind::Plugin => self.validate_plugin(path).await.map(ValidatedPath::Plugin),
        }
    }

    /// Directory that contains a plugins subdirectory (checked by existence only)
    pub async fn validate_server(&self, path: &Path) -> Option<ServerPath> {
        let metadata = match self.storage.metadata(path).await {
            Ok(meta) => meta,
            Err(e) => {
                debug!("Error while getting file stats for {}, skipping: {}", path.display(), e);
                return None;
            }
        };
        if !metadata.is_dir() {
            debug!("Skipping out of scope entry {}", path.display());
            return None;
        }

        if self.storage.exists(&path.join(&self.plugins_folder)).await {
            debug!("{} is a server directory", path.display());
            Some(ServerPath::new(path))
        } else {
            debug!("{} has no {} folder, not a server", path.display(), self.plugins_folder);
            None
        }
    }

    /// Non-empty regular file whose name ends with the configured suffix (case-sensitive)
    pub async fn validate_plugin(&self, path: &Path) -> Option<PluginPath> {
        let metadata = match self.storage.metadata(path).await {
            Ok(meta) => meta,
            Err(e) => {
                debug!("Error while getting file stats for {}, skipping: {}", path.display(), e);
                return None;
            }
        };
        if !metadata.is_file() {
            debug!("Skipping out of scope entry {}", path.display());
            return None;
        }

        let plugin = PluginPath::new(path)?;
        let name = plugin.file_name();
        if !name.ends_with(&self.plugin_extension) || name.len() == self.plugin_extension.len() {
            debug!("Invalid plugin file extension: {}", path.display());
            return None;
        }
        if metadata.len == 0 {
            debug!("Plugin file {} is empty, skipping", path.display());
            return None;
        }

        Some(plugin)
    }
}
