//! # plugsync Storage
//!
//! Filesystem access for the distribution core.
//!
//! - **[`provider`]**: the [`StorageProvider`] trait, i.e. the filesystem
//!   primitives (exists, stat, one-level listing, idempotent directory
//!   creation, byte-exact copy) the rest of the crate is written against.
//! - **[`local`]**: [`LocalStorageProvider`], the `tokio::fs` implementation.
//!   Copies are staged through a temporary file and renamed into place.
//! - **[`config`]**: optional [`Settings`] file in JSON, YAML or TOML.
//! - **[`error`]**: [`StorageSystemError`](error::StorageSystemError).
pub mod config;
pub mod error;
pub mod local;
pub mod provider;

pub use config::{ConfigFormat, Settings};
pub use local::LocalStorageProvider;
pub use provider::{EntryKind, EntryMetadata, StorageProvider};
