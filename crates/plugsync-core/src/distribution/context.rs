use std::path::PathBuf;

use crate::discovery::resolver::PathSource;
use crate::discovery::validator::{PathKind, PluginPath};
use crate::distribution::error::ConfigError;
use crate::kernel::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_PLUGIN_EXTENSION, DEFAULT_PLUGINS_DIR, DEFAULT_UPDATE_DIR,
};
use crate::utils::fs::strip_version_suffix;

/// Execution mode for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Copy plugin archives into update folders
    Live,
    /// Report what would be copied without touching the filesystem
    Simulate,
}

impl ExecutionMode {
    pub fn is_simulate(&self) -> bool {
        matches!(self, ExecutionMode::Simulate)
    }
}

/// How the installed file and the staged copy are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileNaming {
    /// Use the plugin file's exact basename
    #[default]
    Preserve,
    /// Drop a trailing version tag, e.g. `EssentialsX-2.20.1.jar` -> `EssentialsX.jar`
    StripVersionSuffix,
}

impl FileNaming {
    /// File name looked up in the plugins folder and written to the update folder
    pub fn target_file_name(&self, plugin: &PluginPath, extension: &str) -> String {
        match self {
            FileNaming::Preserve => plugin.file_name().to_string(),
            FileNaming::StripVersionSuffix => strip_version_suffix(plugin.file_name(), extension),
        }
    }
}

/// Immutable input to one distribution run.
///
/// Built through [`RunConfigurationBuilder`], which enforces that each side
/// (servers, plugins) comes from exactly one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    servers: PathSource,
    plugins: PathSource,
    update_folder_name: String,
    plugins_folder_name: String,
    plugin_extension: String,
    mode: ExecutionMode,
    skip_checks: bool,
    concurrency: usize,
    file_naming: FileNaming,
}

impl RunConfiguration {
    pub fn builder() -> RunConfigurationBuilder {
        RunConfigurationBuilder::default()
    }

    pub fn servers(&self) -> &PathSource {
        &self.servers
    }

    pub fn plugins(&self) -> &PathSource {
        &self.plugins
    }

    pub fn update_folder_name(&self) -> &str {
        &self.update_folder_name
    }

    pub fn plugins_folder_name(&self) -> &str {
        &self.plugins_folder_name
    }

    pub fn plugin_extension(&self) -> &str {
        &self.plugin_extension
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn simulate(&self) -> bool {
        self.mode.is_simulate()
    }

    pub fn skip_checks(&self) -> bool {
        self.skip_checks
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn file_naming(&self) -> FileNaming {
        self.file_naming
    }
}

/// Builder for [`RunConfiguration`]
#[derive(Debug, Clone, Default)]
pub struct RunConfigurationBuilder {
    server_path: Option<PathBuf>,
    server_directory: Option<PathBuf>,
    plugin_path: Option<PathBuf>,
    plugin_directory: Option<PathBuf>,
    update_folder_name: Option<String>,
    plugins_folder_name: Option<String>,
    plugin_extension: Option<String>,
    simulate: bool,
    skip_checks: bool,
    concurrency: Option<usize>,
    file_naming: FileNaming,
}

impl RunConfigurationBuilder {
    /// Distribute to one server directory
    pub fn server_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.server_path = Some(path.into());
        self
    }

    /// Distribute to every server directory inside `path`
    pub fn server_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.server_directory = Some(path.into());
        self
    }

    /// Distribute one plugin archive
    pub fn plugin_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.plugin_path = Some(path.into());
        self
    }

    /// Distribute every plugin archive inside `path`
    pub fn plugin_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.plugin_directory = Some(path.into());
        self
    }

    pub fn update_folder_name(mut self, name: impl Into<String>) -> Self {
        self.update_folder_name = Some(name.into());
        self
    }

    pub fn plugins_folder_name(mut self, name: impl Into<String>) -> Self {
        self.plugins_folder_name = Some(name.into());
        self
    }

    pub fn plugin_extension(mut self, extension: impl Into<String>) -> Self {
        self.plugin_extension = Some(extension.into());
        self
    }

    pub fn simulate(mut self, simulate: bool) -> Self {
        self.simulate = simulate;
        self
    }

    pub fn skip_checks(mut self, skip_checks: bool) -> Self {
        self.skip_checks = skip_checks;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    pub fn file_naming(mut self, file_naming: FileNaming) -> Self {
        self.file_naming = file_naming;
        self
    }

    pub fn build(self) -> Result<RunConfiguration, ConfigError> {
        let servers = pick_source(PathKind::Server, self.server_path, self.server_directory)?;
        let plugins = pick_source(PathKind::Plugin, self.plugin_path, self.plugin_directory)?;

        let update_folder_name = folder_name(
            "update_folder_name",
            self.update_folder_name.unwrap_or_else(|| DEFAULT_UPDATE_DIR.to_string()),
        )?;
        let plugins_folder_name = folder_name(
            "plugins_folder_name",
            self.plugins_folder_name.unwrap_or_else(|| DEFAULT_PLUGINS_DIR.to_string()),
        )?;

        let plugin_extension = self
            .plugin_extension
            .unwrap_or_else(|| DEFAULT_PLUGIN_EXTENSION.to_string());
        if plugin_extension.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "plugin_extension",
                reason: "must not be empty".to_string(),
            });
        }

        let concurrency = self.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency",
                reason: "must be at least 1".to_string(),
            });
        }

        let mode = if self.simulate {
            ExecutionMode::Simulate
        } else {
            ExecutionMode::Live
        };

        Ok(RunConfiguration {
            servers,
            plugins,
            update_folder_name,
            plugins_folder_name,
            plugin_extension,
            mode,
            skip_checks: self.skip_checks,
            concurrency,
            file_naming: self.file_naming,
        })
    }
}

fn pick_source(
    kind: PathKind,
    single: Option<PathBuf>,
    directory: Option<PathBuf>,
) -> Result<PathSource, ConfigError> {
    match (single, directory) {
        (Some(path), None) => Ok(PathSource::Single(path)),
        (None, Some(dir)) => Ok(PathSource::Directory(dir)),
        (Some(_), Some(_)) => Err(ConfigError::ConflictingSources { kind }),
        (None, None) => Err(ConfigError::MissingSource { kind }),
    }
}

// Folder names are joined onto server paths, so they must be one plain component
fn folder_name(field: &'static str, name: String) -> Result<String, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        field,
        reason: format!("'{}' {}", name, reason),
    };
    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(invalid("must be a single folder name"));
    }
    Ok(name)
}
