use std::fmt;
use std::path::{Path, PathBuf};

use crate::discovery::validator::{PluginPath, ServerPath};
use crate::distribution::context::ExecutionMode;
use crate::distribution::dry_run::{DryRunReport, FileOperation};

/// Verdict for one (server, plugin) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    /// Installed version is older, or checks were skipped
    Proceed,
    /// The server has no file of that name in its plugins folder
    SkippedNotInstalled,
    /// File names match but the archives declare different plugins
    SkippedNameMismatch { installed: String, source: String },
    SkippedSameVersion { version: String },
    /// The server already runs a newer version than the source
    SkippedOlderUpdate { installed: String, source: String },
    /// Another update archive in the run stages to the same file with a higher version
    SkippedSuperseded { by: String },
    /// Metadata could not be read or a version was not valid semver
    SkippedError(String),
}

impl UpdateDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, UpdateDecision::Proceed)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, UpdateDecision::SkippedError(_))
    }
}

impl fmt::Display for UpdateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateDecision::Proceed => write!(f, "proceed"),
            UpdateDecision::SkippedNotInstalled => write!(f, "skipped: not installed"),
            UpdateDecision::SkippedNameMismatch { installed, source } => write!(
                f,
                "skipped: installed plugin is '{}', update is '{}'",
                installed, source
            ),
            UpdateDecision::SkippedSameVersion { version } => {
                write!(f, "skipped: version {} already installed", version)
            }
            UpdateDecision::SkippedOlderUpdate { installed, source } => write!(
                f,
                "skipped: installed {} is newer than update {}",
                installed, source
            ),
            UpdateDecision::SkippedSuperseded { by } => write!(f, "skipped: superseded by {}", by),
            UpdateDecision::SkippedError(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// What happened to the file for a pair that proceeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Copied { destination: PathBuf, bytes: u64 },
    /// Simulate mode: the copy that would have happened
    Simulated {
        operation: FileOperation,
        creates_update_folder: bool,
    },
    Failed { destination: PathBuf, reason: String },
}

/// Coarse status of a pair, for counting and exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairStatus {
    Copied,
    WouldCopy,
    Skipped,
    Failed,
}

/// Final record for one (plugin, server) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairOutcome {
    pub plugin: PluginPath,
    pub server: ServerPath,
    pub decision: UpdateDecision,
    /// Present only when the decision was `Proceed`
    pub transfer: Option<TransferOutcome>,
}

impl PairOutcome {
    pub fn status(&self) -> PairStatus {
        match (&self.decision, &self.transfer) {
            (UpdateDecision::SkippedError(_), _) => PairStatus::Failed,
            (_, Some(TransferOutcome::Failed { .. })) => PairStatus::Failed,
            (_, Some(TransferOutcome::Copied { .. })) => PairStatus::Copied,
            (_, Some(TransferOutcome::Simulated { .. })) => PairStatus::WouldCopy,
            _ => PairStatus::Skipped,
        }
    }
}

impl fmt::Display for PairOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: ", self.plugin.file_name(), self.server)?;
        match &self.transfer {
            Some(TransferOutcome::Copied { destination, bytes }) => {
                write!(f, "copied to {} ({} bytes)", destination.display(), bytes)
            }
            Some(TransferOutcome::Simulated { operation, .. }) => match &operation.destination {
                Some(dest) => write!(f, "would copy to {}", dest.display()),
                None => write!(f, "would copy"),
            },
            Some(TransferOutcome::Failed { destination, reason }) => {
                write!(f, "copy to {} failed: {}", destination.display(), reason)
            }
            None => write!(f, "{}", self.decision),
        }
    }
}

/// Per-status counters for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pairs: usize,
    pub copied: usize,
    pub would_copy: usize,
    pub failed: usize,
    pub not_installed: usize,
    pub name_mismatch: usize,
    pub same_version: usize,
    pub older_update: usize,
    pub superseded: usize,
}

impl RunSummary {
    pub fn skipped(&self) -> usize {
        self.not_installed + self.name_mismatch + self.same_version + self.older_update + self.superseded
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pair(s): {} copied, {} would copy, {} skipped, {} failed",
            self.pairs,
            self.copied,
            self.would_copy,
            self.skipped(),
            self.failed
        )
    }
}

/// Aggregate outcome of a run: one [`PairOutcome`] per server x plugin pair
#[derive(Debug, Clone)]
pub struct RunResult {
    mode: ExecutionMode,
    servers: Vec<ServerPath>,
    plugins: Vec<PluginPath>,
    outcomes: Vec<PairOutcome>,
}

impl RunResult {
    pub(crate) fn new(
        mode: ExecutionMode,
        servers: Vec<ServerPath>,
        plugins: Vec<PluginPath>,
        outcomes: Vec<PairOutcome>,
    ) -> Self {
        Self {
            mode,
            servers,
            plugins,
            outcomes,
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn servers(&self) -> &[ServerPath] {
        &self.servers
    }

    pub fn plugins(&self) -> &[PluginPath] {
        &self.plugins
    }

    /// Outcomes ordered plugin-major, server-minor
    pub fn outcomes(&self) -> &[PairOutcome] {
        &self.outcomes
    }

    pub fn outcome_for(&self, plugin: &Path, server: &Path) -> Option<&PairOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.plugin.path() == plugin && o.server.path() == server)
    }

    /// Copies a simulated run would have performed
    pub fn planned_operations(&self) -> Vec<&FileOperation> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.transfer {
                Some(TransferOutcome::Simulated { operation, .. }) => Some(operation),
                _ => None,
            })
            .collect()
    }

    /// Planned operations including each update folder that would be created once
    pub fn dry_run_report(&self) -> DryRunReport {
        let mut operations: Vec<FileOperation> = Vec::new();
        let mut created: Vec<PathBuf> = Vec::new();
        for outcome in &self.outcomes {
            if let Some(TransferOutcome::Simulated {
                operation,
                creates_update_folder,
            }) = &outcome.transfer
            {
                let folder = operation.destination.as_deref().and_then(Path::parent);
                if let Some(folder) = folder.filter(|_| *creates_update_folder) {
                    if !created.iter().any(|c| c == folder) {
                        created.push(folder.to_path_buf());
                        operations.push(FileOperation::create_dir(folder));
                    }
                }
                operations.push(operation.clone());
            }
        }
        DryRunReport::from_operations(&operations)
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.status() == PairStatus::Failed)
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            pairs: self.outcomes.len(),
            ..RunSummary::default()
        };
        for outcome in &self.outcomes {
            match outcome.status() {
                PairStatus::Copied => summary.copied += 1,
                PairStatus::WouldCopy => summary.would_copy += 1,
                PairStatus::Failed => summary.failed += 1,
                PairStatus::Skipped => match outcome.decision {
                    UpdateDecision::SkippedNotInstalled => summary.not_installed += 1,
                    UpdateDecision::SkippedNameMismatch { .. } => summary.name_mismatch += 1,
                    UpdateDecision::SkippedSameVersion { .. } => summary.same_version += 1,
                    UpdateDecision::SkippedOlderUpdate { .. } => summary.older_update += 1,
                    UpdateDecision::SkippedSuperseded { .. } => summary.superseded += 1,
                    UpdateDecision::Proceed | UpdateDecision::SkippedError(_) => {}
                },
            }
        }
        summary
    }
}
