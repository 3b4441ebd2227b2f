//! # plugsync Discovery
//!
//! Turns user-supplied paths into validated server directories and plugin
//! archives.
//!
//! - **[`validator`]**: [`PathValidator`] decides whether one path qualifies,
//!   producing a typed [`ServerPath`] or [`PluginPath`].
//! - **[`resolver`]**: [`PathResolver`] expands a [`PathSource`] (one explicit
//!   path, or a directory scanned one level deep) into the validated list.
//! - **[`error`]**: [`DiscoveryError`](error::DiscoveryError).
pub mod error;
pub mod resolver;
pub mod validator;

pub use error::DiscoveryError;
pub use resolver::{PathResolver, PathSource};
pub use validator::{PathKind, PathValidator, PluginPath, ServerPath, ValidatedPath};

#[cfg(test)]
mod tests;
