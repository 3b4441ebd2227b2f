/// Application name
pub const APP_NAME: &str = "plugsync";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subdirectory that marks a directory as a server and holds its installed plugins
pub const DEFAULT_PLUGINS_DIR: &str = "plugins";

/// Staging folder inside the plugins directory picked up by the server on restart
pub const DEFAULT_UPDATE_DIR: &str = "update";

/// Recognized plugin archive suffix (matched case-sensitively)
pub const DEFAULT_PLUGIN_EXTENSION: &str = ".jar";

/// Metadata file embedded at the root of every plugin archive
pub const PLUGIN_METADATA_FILE: &str = "plugin.yml";

/// Upper bound on in-flight validations and pair evaluations
pub const DEFAULT_CONCURRENCY: usize = 8;
