//! # plugsync Core Kernel
//!
//! Shared foundations for every other subsystem of `plugsync-core`.
//!
//! - **Core Constants**: default folder names, archive suffix and limits via the
//!   `constants` submodule.
//! - **Error Handling**: the crate-wide [`Error`](error::Error) that wraps each
//!   subsystem error, plus the [`Result`](error::Result) alias.
pub mod constants;
pub mod error;

pub use error::{Error, Result};
