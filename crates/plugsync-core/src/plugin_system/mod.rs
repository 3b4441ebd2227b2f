//! # plugsync Plugin System
//!
//! Everything the distribution core knows about plugin archives themselves.
//!
//! - **[`descriptor`]**: [`PluginDescriptor`] and the [`DescriptorReader`]
//!   trait the eligibility checker reads archives through.
//! - **[`reader`]**: [`JarDescriptorReader`], which pulls `plugin.yml` out of
//!   a ZIP archive and parses it as YAML.
//! - **[`version`]**: strict semver parsing and precedence comparison.
//! - **[`error`]**: [`DescriptorError`](error::DescriptorError).
pub mod descriptor;
pub mod error;
pub mod reader;
pub mod version;

pub use descriptor::{DescriptorReader, PluginDescriptor};
pub use error::DescriptorError;
pub use reader::JarDescriptorReader;
pub use version::{VersionError, compare};
