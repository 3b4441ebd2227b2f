use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};
use semver::Version;
use tokio::sync::OnceCell;

use crate::discovery::validator::{PluginPath, ServerPath};
use crate::distribution::context::FileNaming;
use crate::distribution::outcome::UpdateDecision;
use crate::kernel::constants::{DEFAULT_PLUGIN_EXTENSION, DEFAULT_PLUGINS_DIR};
use crate::plugin_system::descriptor::{DescriptorReader, PluginDescriptor};
use crate::plugin_system::error::DescriptorError;
use crate::plugin_system::version;
use crate::storage::StorageProvider;

type DescriptorSlot = OnceCell<Result<PluginDescriptor, DescriptorError>>;

/// Source plugin descriptors for one run, each read at most once and only on demand.
#[derive(Debug, Default)]
pub struct SourceDescriptorCache {
    slots: HashMap<PathBuf, DescriptorSlot>,
}

impl SourceDescriptorCache {
    pub fn for_plugins<'a, I>(plugins: I) -> Self
    where
        I: IntoIterator<Item = &'a PluginPath>,
    {
        let slots = plugins
            .into_iter()
            .map(|plugin| (plugin.path().to_path_buf(), OnceCell::new()))
            .collect();
        Self { slots }
    }

    async fn read(
        &self,
        plugin: &PluginPath,
        reader: &dyn DescriptorReader,
    ) -> Result<PluginDescriptor, DescriptorError> {
        match self.slots.get(plugin.path()) {
            Some(slot) => slot
                .get_or_init(|| reader.read_descriptor(plugin.path()))
                .await
                .clone(),
            None => reader.read_descriptor(plugin.path()).await,
        }
    }
}

/// Decides whether a plugin archive should be staged on a given server.
///
/// A plugin is only ever updated, never introduced: servers that do not
/// already have a file of the same name are skipped.
#[derive(Debug)]
pub struct EligibilityChecker {
    storage: Arc<dyn StorageProvider>,
    reader: Arc<dyn DescriptorReader>,
    plugins_folder: String,
    plugin_extension: String,
    file_naming: FileNaming,
    source_cache: Option<SourceDescriptorCache>,
}

impl EligibilityChecker {
    pub fn new(storage: Arc<dyn StorageProvider>, reader: Arc<dyn DescriptorReader>) -> Self {
        Self {
            storage,
            reader,
            plugins_folder: DEFAULT_PLUGINS_DIR.to_string(),
            plugin_extension: DEFAULT_PLUGIN_EXTENSION.to_string(),
            file_naming: FileNaming::default(),
            source_cache: None,
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

    pub fn with_file_naming(mut self, file_naming: FileNaming) -> Self {
        self.file_naming = file_naming;
        self
    }

    pub fn with_source_cache(mut self, cache: SourceDescriptorCache) -> Self {
        self.source_cache = Some(cache);
        self
    }

    /// `<server>/<plugins>/<target file name>`, where an installed copy would live
    pub fn installed_file(&self, server: &ServerPath, plugin: &PluginPath) -> PathBuf {
        server
            .plugins_dir(&self.plugins_folder)
            .join(self.file_naming.target_file_name(plugin, &self.plugin_extension))
    }

    pub async fn check_eligibility(
        &self,
        server: &ServerPath,
        plugin: &PluginPath,
        skip_checks: bool,
    ) -> UpdateDecision {
        if skip_checks {
            debug!("Checks skipped for {} on {}", plugin.file_name(), server);
            return UpdateDecision::Proceed;
        }

        let installed_path = self.installed_file(server, plugin);
        match self.storage.metadata(&installed_path).await {
            Ok(meta) if meta.is_file() => {}
            _ => {
                debug!("{} is not installed on {}", plugin.file_name(), server);
                return UpdateDecision::SkippedNotInstalled;
            }
        }

        let installed = match self.reader.read_descriptor(&installed_path).await {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!("Cannot read installed plugin on {}: {}", server, e);
                return UpdateDecision::SkippedError(format!("installed plugin: {}", e));
            }
        };
        let source = match self.source_descriptor(plugin).await {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!("Cannot read update {}: {}", plugin, e);
                return UpdateDecision::SkippedError(format!("update plugin: {}", e));
            }
        };

        if !installed.same_plugin(&source) {
            return UpdateDecision::SkippedNameMismatch {
                installed: installed.name,
                source: source.name,
            };
        }

        match version::compare(&installed.version, &source.version) {
            Ok(Ordering::Less) => {
                debug!("{} on {}: {} -> {}", installed.name, server, installed.version, source.version);
                UpdateDecision::Proceed
            }
            Ok(Ordering::Equal) => UpdateDecision::SkippedSameVersion {
                version: source.version,
            },
            Ok(Ordering::Greater) => UpdateDecision::SkippedOlderUpdate {
                installed: installed.version,
                source: source.version,
            },
            Err(e) => {
                warn!("Cannot compare versions of {} on {}: {}", installed.name, server, e);
                UpdateDecision::SkippedError(e.to_string())
            }
        }
    }

    /// Parsed version declared by the update archive, `None` if unreadable or not semver
    pub async fn source_version(&self, plugin: &PluginPath) -> Option<Version> {
        let descriptor = self.source_descriptor(plugin).await.ok()?;
        version::parse_version(&descriptor.version).ok()
    }

    async fn source_descriptor(&self, plugin: &PluginPath) -> Result<PluginDescriptor, DescriptorError> {
        match &self.source_cache {
            Some(cache) => cache.read(plugin, self.reader.as_ref()).await,
            None => self.reader.read_descriptor(plugin.path()).await,
        }
    }
}
