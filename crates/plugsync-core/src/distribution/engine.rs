use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use semver::Version;

use crate::discovery::resolver::PathResolver;
use crate::discovery::validator::{PathValidator, PluginPath, ServerPath};
use crate::distribution::context::RunConfiguration;
use crate::distribution::dry_run::FileOperation;
use crate::distribution::eligibility::{EligibilityChecker, SourceDescriptorCache};
use crate::distribution::error::DistributionError;
use crate::distribution::outcome::{PairOutcome, RunResult, TransferOutcome, UpdateDecision};
use crate::plugin_system::descriptor::DescriptorReader;
use crate::plugin_system::reader::JarDescriptorReader;
use crate::storage::{LocalStorageProvider, StorageProvider};

/// Phases a run moves through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    ResolvingPaths,
    ValidatingCounts,
    Distributing,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::ResolvingPaths => "resolving paths",
            RunPhase::ValidatingCounts => "validating counts",
            RunPhase::Distributing => "distributing",
            RunPhase::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Orchestrates a full run: resolve, check counts, evaluate every
/// plugin x server pair, settle pairs that would stage the same file, stage
/// the eligible copies, aggregate.
///
/// Each pair is evaluated independently and its failures are captured in its
/// own [`PairOutcome`]; only the conditions in [`DistributionError`] end a run.
#[derive(Debug, Clone)]
pub struct DistributionEngine {
    storage: Arc<dyn StorageProvider>,
    reader: Arc<dyn DescriptorReader>,
}

impl DistributionEngine {
    pub fn new(storage: Arc<dyn StorageProvider>, reader: Arc<dyn DescriptorReader>) -> Self {
        Self { storage, reader }
    }

    /// Engine on the local filesystem, reading `plugin.yml` from jar archives
    pub fn local() -> Self {
        Self::new(Arc::new(LocalStorageProvider::new()), Arc::new(JarDescriptorReader::new()))
    }

    pub async fn run(&self, config: RunConfiguration) -> Result<RunResult, DistributionError> {
        debug!("Run phase: {}", RunPhase::ResolvingPaths);
        let validator = PathValidator::new(Arc::clone(&self.storage))
            .with_plugins_folder(config.plugins_folder_name())
            .with_plugin_extension(config.plugin_extension());
        let resolver = PathResolver::new(validator).with_concurrency(config.concurrency());

        let (servers, plugins) = tokio::try_join!(
            resolver.resolve_servers(config.servers()),
            resolver.resolve_plugins(config.plugins()),
        )?;

        debug!("Run phase: {}", RunPhase::ValidatingCounts);
        if servers.is_empty() {
            return Err(DistributionError::NoServersFound {
                origin: config.servers().clone(),
            });
        }
        if plugins.is_empty() {
            return Err(DistributionError::NoPluginsFound {
                origin: config.plugins().clone(),
            });
        }
        info!("Servers: {}", join_display(&servers));
        info!("Plugins: {}", join_display(&plugins));

        debug!("Run phase: {}", RunPhase::Distributing);
        let checker = EligibilityChecker::new(Arc::clone(&self.storage), Arc::clone(&self.reader))
            .with_plugins_folder(config.plugins_folder_name())
            .with_plugin_extension(config.plugin_extension())
            .with_file_naming(config.file_naming())
            .with_source_cache(SourceDescriptorCache::for_plugins(&plugins));

        // Plugin-major order; the index restores it after unordered completion
        let pairs: Vec<(usize, (&PluginPath, &ServerPath))> = plugins
            .iter()
            .flat_map(|plugin| servers.iter().map(move |server| (plugin, server)))
            .enumerate()
            .collect();

        let (checker, config_ref) = (&checker, &config);
        let mut indexed: Vec<(usize, DecidedPair<'_>)> = stream::iter(pairs)
            .map(|(index, (plugin, server))| async move {
                let decision = checker.check_eligibility(server, plugin, config_ref.skip_checks()).await;
                debug!("{} on {}: {}", plugin.file_name(), server, decision);
                (index, DecidedPair { plugin, server, decision })
            })
            .buffer_unordered(config.concurrency())
            .collect()
            .await;
        indexed.sort_by_key(|(index, _)| *index);
        let mut decided: Vec<DecidedPair<'_>> = indexed.into_iter().map(|(_, pair)| pair).collect();

        self.settle_collisions(checker, &config, &mut decided).await;

        let outcomes: Vec<PairOutcome> = stream::iter(decided)
            .map(|pair| async move {
                let transfer = if pair.decision.is_proceed() {
                    Some(self.transfer(config_ref, pair.server, pair.plugin).await)
                } else {
                    None
                };
                PairOutcome {
                    plugin: pair.plugin.clone(),
                    server: pair.server.clone(),
                    decision: pair.decision,
                    transfer,
                }
            })
            .buffered(config.concurrency())
            .collect()
            .await;

        debug!("Run phase: {}", RunPhase::Done);
        let result = RunResult::new(config.mode(), servers, plugins, outcomes);
        info!("Update done: {}", result.summary());
        Ok(result)
    }

    /// Leaves at most one proceeding pair per staged file.
    ///
    /// Several update archives can map to the same file name on a server
    /// (for example `Foo-1.0.0.jar` and `Foo-2.0.0.jar` with suffix stripping).
    /// The one with the highest version is kept and the others are superseded.
    /// Without a single highest valid version none of them is staged.
    async fn settle_collisions(
        &self,
        checker: &EligibilityChecker,
        config: &RunConfiguration,
        decided: &mut [DecidedPair<'_>],
    ) {
        let mut groups: BTreeMap<PathBuf, Vec<usize>> = BTreeMap::new();
        for (position, pair) in decided.iter().enumerate() {
            if pair.decision.is_proceed() {
                groups
                    .entry(staged_path(config, pair.server, pair.plugin))
                    .or_default()
                    .push(position);
            }
        }

        for (destination, positions) in groups.into_iter().filter(|(_, positions)| positions.len() > 1) {
            let mut versions = Vec::with_capacity(positions.len());
            for &position in &positions {
                versions.push(checker.source_version(decided[position].plugin).await);
            }

            match unique_highest(&versions) {
                Some(winner) => {
                    let by = decided[positions[winner]].plugin.file_name().to_string();
                    for (rank, &position) in positions.iter().enumerate() {
                        if rank == winner {
                            continue;
                        }
                        warn!(
                            "{} superseded by {} for {}",
                            decided[position].plugin,
                            by,
                            destination.display()
                        );
                        decided[position].decision = UpdateDecision::SkippedSuperseded { by: by.clone() };
                    }
                }
                None => {
                    let reason = format!(
                        "{} update archives would be staged as {}",
                        positions.len(),
                        destination.display()
                    );
                    warn!("Not staging {}: no single highest version", destination.display());
                    for &position in &positions {
                        decided[position].decision = UpdateDecision::SkippedError(reason.clone());
                    }
                }
            }
        }
    }

    /// Copies into `<server>/<plugins>/<update>/<file name>`, or records the copy when simulating.
    async fn transfer(&self, config: &RunConfiguration, server: &ServerPath, plugin: &PluginPath) -> TransferOutcome {
        let update_dir = update_dir(config, server);
        let destination = staged_path(config, server, plugin);

        if config.simulate() {
            let size = match self.storage.metadata(plugin.path()).await {
                Ok(meta) => meta.len,
                Err(e) => {
                    debug!("Cannot stat {} for size estimate: {}", plugin, e);
                    0
                }
            };
            let creates_update_folder = !self.storage.exists(&update_dir).await;
            info!("Would copy {} to {}", plugin, destination.display());
            return TransferOutcome::Simulated {
                operation: FileOperation::copy(plugin.path(), destination, size),
                creates_update_folder,
            };
        }

        if let Err(e) = self.storage.create_dir_all(&update_dir).await {
            warn!("Cannot create update folder {}: {}", update_dir.display(), e);
            return TransferOutcome::Failed {
                destination,
                reason: e.to_string(),
            };
        }

        match self.storage.copy(plugin.path(), &destination).await {
            Ok(bytes) => {
                info!("Copied {} to {}", plugin, destination.display());
                TransferOutcome::Copied { destination, bytes }
            }
            Err(e) => {
                warn!("Copying {} to {} failed: {}", plugin, destination.display(), e);
                TransferOutcome::Failed {
                    destination,
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// A pair with its eligibility verdict, before any file is touched
struct DecidedPair<'a> {
    plugin: &'a PluginPath,
    server: &'a ServerPath,
    decision: UpdateDecision,
}

/// `<server>/<plugins>/<update>`
fn update_dir(config: &RunConfiguration, server: &ServerPath) -> PathBuf {
    server
        .plugins_dir(config.plugins_folder_name())
        .join(config.update_folder_name())
}

fn staged_path(config: &RunConfiguration, server: &ServerPath, plugin: &PluginPath) -> PathBuf {
    update_dir(config, server).join(
        config
            .file_naming()
            .target_file_name(plugin, config.plugin_extension()),
    )
}

/// Index of the single highest version, if every version is valid and the top is not tied
fn unique_highest(versions: &[Option<Version>]) -> Option<usize> {
    let parsed: Vec<&Version> = versions.iter().map(Option::as_ref).collect::<Option<_>>()?;
    let (winner, highest) = parsed
        .iter()
        .copied()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.cmp_precedence(b))?;
    let ties = parsed
        .iter()
        .filter(|version| version.cmp_precedence(highest) == Ordering::Equal)
        .count();
    (ties == 1).then_some(winner)
}

fn join_display<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
