use std::fmt::{self, Debug};
use std::path::Path;

use async_trait::async_trait;

use crate::plugin_system::error::DescriptorError;

/// The `{name, version}` pair embedded in a plugin archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Plugin name as declared by its metadata
    pub name: String,
    /// Version string, not yet validated as semver
    pub version: String,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Whether both descriptors name the same plugin (case-insensitive)
    pub fn same_plugin(&self, other: &PluginDescriptor) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// Maps a plugin archive path to its embedded descriptor.
#[async_trait]
pub trait DescriptorReader: Send + Sync + Debug {
    async fn read_descriptor(&self, archive: &Path) -> Result<PluginDescriptor, DescriptorError>;
}
