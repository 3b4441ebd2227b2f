use std::fmt;
use std::future::{self, Future};
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use crate::discovery::error::DiscoveryError;
use crate::discovery::validator::{PathKind, PathValidator, PluginPath, ServerPath, ValidatedPath};
use crate::kernel::constants::DEFAULT_CONCURRENCY;

/// Where candidates for one side of a run come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    /// One explicit path, validated on its own
    Single(PathBuf),
    /// A directory whose immediate entries are the candidates
    Directory(PathBuf),
}

impl PathSource {
    pub fn path(&self) -> &Path {
        match self {
            PathSource::Single(path) | PathSource::Directory(path) => path,
        }
    }
}

impl fmt::Display for PathSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSource::Single(path) => write!(f, "{}", path.display()),
            PathSource::Directory(path) => write!(f, "{} (directory)", path.display()),
        }
    }
}

/// Turns a [`PathSource`] into the list of paths that pass validation.
#[derive(Debug, Clone)]
pub struct PathResolver {
    validator: PathValidator,
    concurrency: usize,
}

impl PathResolver {
    pub fn new(validator: PathValidator) -> Self {
        Self {
            validator,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Limit how many entries are validated at once (minimum 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Resolve candidates of `kind`.
    ///
    /// A single explicit path that fails validation yields an empty list, the
    /// same as an empty directory. Only an unreadable base directory is an error.
    pub async fn resolve(&self, kind: PathKind, source: &PathSource) -> Result<Vec<ValidatedPath>, DiscoveryError> {
        self.resolve_with(kind, source, |path| async move {
            self.validator.validate(kind, &path).await
        })
        .await
    }

    pub async fn resolve_servers(&self, source: &PathSource) -> Result<Vec<ServerPath>, DiscoveryError> {
        self.resolve_with(PathKind::Server, source, |path| async move {
            self.validator.validate_server(&path).await
        })
        .await
    }

    pub async fn resolve_plugins(&self, source: &PathSource) -> Result<Vec<PluginPath>, DiscoveryError> {
        self.resolve_with(PathKind::Plugin, source, |path| async move {
            self.validator.validate_plugin(&path).await
        })
        .await
    }

    async fn resolve_with<T, F, Fut>(
        &self,
        kind: PathKind,
        source: &PathSource,
        validate: F,
    ) -> Result<Vec<T>, DiscoveryError>
    where
        F: Fn(PathBuf) -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        let candidates = match source {
            PathSource::Single(path) => vec![path.clone()],
            PathSource::Directory(dir) => self.list_directory(kind, dir).await?,
        };
        debug!("Validating {} {} candidate(s) from {}", candidates.len(), kind, source);

        // buffered() keeps listing order, so output is stable for display
        let resolved: Vec<T> = stream::iter(candidates)
            .map(validate)
            .buffered(self.concurrency)
            .filter_map(future::ready)
            .collect()
            .await;

        if resolved.is_empty() {
            if let PathSource::Single(path) = source {
                warn!("{} does not qualify as a {}", path.display(), kind);
            }
        }
        info!("Resolved {} {}(s) from {}", resolved.len(), kind, source);
        Ok(resolved)
    }

    async fn list_directory(&self, kind: PathKind, dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
        let mut entries = self
            .validator
            .storage()
            .read_dir(dir)
            .await
            .map_err(|source| DiscoveryError::DirectoryRead {
                kind,
                path: dir.to_path_buf(),
                source,
            })?;
        entries.sort();
        Ok(entries)
    }
}
