pub mod fs;

pub use fs::{file_name_of, strip_version_suffix};
