use std::cmp::Ordering;

use semver::Version;
use thiserror::Error;

/// Error type for version parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid semantic version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },
}

/// Parses a strict semantic version (`major.minor.patch[-pre][+build]`).
///
/// No coercion is applied: `"1.2"`, `"v1.2.3"` and padded input are rejected.
pub fn parse_version(input: &str) -> Result<Version, VersionError> {
    Version::parse(input).map_err(|e| VersionError::InvalidVersion {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Orders two version strings by semver precedence.
///
/// Build metadata is ignored, so `1.0.0+a` and `1.0.0+b` compare `Equal`.
/// Both inputs are validated before comparing; the first invalid one is reported.
pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionError> {
    let a = parse_version(a)?;
    let b = parse_version(b)?;
    Ok(a.cmp_precedence(&b))
}
