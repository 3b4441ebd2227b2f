use std::path::PathBuf;

use clap::Parser;
use plugsync_core::distribution::{ConfigError, FileNaming, RunConfiguration, RunResult};
use plugsync_core::storage::Settings;

/// plugsync: stage updated plugin archives into game-server update folders
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// A single server directory (must contain a plugins folder)
    #[arg(short = 's', long, value_name = "DIR", conflicts_with = "server_dir")]
    pub server: Option<PathBuf>,

    /// A directory whose immediate subdirectories are servers
    #[arg(short = 'S', long, value_name = "DIR")]
    pub server_dir: Option<PathBuf>,

    /// A single plugin archive
    #[arg(short = 'p', long, value_name = "FILE", conflicts_with = "plugin_dir")]
    pub plugin: Option<PathBuf>,

    /// A directory of plugin archives (not searched recursively)
    #[arg(short = 'P', long, value_name = "DIR")]
    pub plugin_dir: Option<PathBuf>,

    /// Staging folder inside each server's plugins folder [default: update]
    #[arg(short = 'u', long, value_name = "NAME")]
    pub update_folder: Option<String>,

    /// Plugin archive suffix [default: .jar]
    #[arg(long, value_name = "SUFFIX")]
    pub extension: Option<String>,

    /// Maximum number of pairs evaluated at once [default: 8]
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Report what would be copied without touching any file
    #[arg(short = 'n', long)]
    pub simulate: bool,

    /// Copy to every server without comparing installed versions
    #[arg(long)]
    pub skip_checks: bool,

    /// Match and stage archives without their version tag (Foo-1.2.3.jar -> Foo.jar)
    #[arg(long)]
    pub strip_version_suffix: bool,

    /// Exit with status 1 if any pair failed
    #[arg(long)]
    pub strict: bool,

    /// Settings file (.json, .yaml, .yml or .toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'd', long, conflicts_with = "quiet")]
    pub debug: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Default `env_logger` filter; `RUST_LOG` still takes precedence
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Merge flags over the settings file and build the run configuration.
    ///
    /// A side given on the command line replaces the settings file's
    /// directory for that side entirely.
    pub fn to_configuration(&self, settings: &Settings) -> Result<RunConfiguration, ConfigError> {
        let mut builder = RunConfiguration::builder()
            .simulate(self.simulate)
            .skip_checks(self.skip_checks);

        if self.server.is_some() || self.server_dir.is_some() {
            if let Some(server) = &self.server {
                builder = builder.server_path(server);
            }
            if let Some(dir) = &self.server_dir {
                builder = builder.server_directory(dir);
            }
        } else if let Some(dir) = &settings.server_directory {
            builder = builder.server_directory(dir);
        }

        if self.plugin.is_some() || self.plugin_dir.is_some() {
            if let Some(plugin) = &self.plugin {
                builder = builder.plugin_path(plugin);
            }
            if let Some(dir) = &self.plugin_dir {
                builder = builder.plugin_directory(dir);
            }
        } else if let Some(dir) = &settings.plugin_directory {
            builder = builder.plugin_directory(dir);
        }

        if let Some(name) = self.update_folder.as_ref().or(settings.update_folder.as_ref()) {
            builder = builder.update_folder_name(name);
        }
        if let Some(name) = &settings.plugins_folder {
            builder = builder.plugins_folder_name(name);
        }
        if let Some(extension) = self.extension.as_ref().or(settings.plugin_extension.as_ref()) {
            builder = builder.plugin_extension(extension);
        }
        if let Some(concurrency) = self.concurrency.or(settings.concurrency) {
            builder = builder.concurrency(concurrency);
        }
        if self.strip_version_suffix || settings.strip_version_suffix.unwrap_or(false) {
            builder = builder.file_naming(FileNaming::StripVersionSuffix);
        }

        builder.build()
    }
}

/// Print resolved paths, every pair outcome and the summary to stdout
pub fn print_report(result: &RunResult) {
    println!("Servers ({}):", result.servers().len());
    for server in result.servers() {
        println!("  {}", server);
    }
    println!("Plugins ({}):", result.plugins().len());
    for plugin in result.plugins() {
        println!("  {}", plugin);
    }

    println!("Results:");
    for outcome in result.outcomes() {
        println!("  {}", outcome);
    }

    if result.mode().is_simulate() {
        println!();
        print!("{}", result.dry_run_report());
    }
    println!("{}", result.summary());
}
