pub mod discovery;
pub mod distribution;
pub mod kernel;
pub mod plugin_system;
pub mod storage;
pub mod utils;

// Re-export the types the binary drives a run with
pub use distribution::{DistributionEngine, RunConfiguration, RunResult};
pub use kernel::error::Error as KernelError;
pub use plugin_system::{DescriptorReader, JarDescriptorReader};
pub use storage::{LocalStorageProvider, Settings, StorageProvider};

#[cfg(test)]
mod tests;
