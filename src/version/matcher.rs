//! Version matching abstraction for different ecosystems

use crate::ecosystem::Ecosystem;
use crate::version::error::VersionsError;

/// Trait for ecosystem-specific version grammar and equality
///
/// Each ecosystem spells versions differently:
/// - npm/crates.io: semantic versioning with prerelease tags
/// - Go: `v` prefix on the proxy, pseudo-versions derived from commits
/// - PyPI: PEP 440 (`1.0 == 1.0.0`, `5.1rc1`)
/// - Packagist: optional `v` prefix, composer stability suffixes
pub trait VersionMatcher: Send + Sync {
    /// Returns the ecosystem this matcher handles
    fn ecosystem(&self) -> Ecosystem;

    /// Whether `version` parses under this ecosystem's grammar
    fn is_valid(&self, version: &str) -> bool;

    /// Compares a record version against one registry version
    ///
    /// Returns `None` when `candidate` does not parse.
    fn is_same_version(&self, version: &str, candidate: &str) -> Option<bool>;

    /// Versions that are never published on their own and cannot be confirmed
    /// against a listing (Go pseudo-versions)
    fn is_unlisted(&self, _version: &str) -> bool {
        false
    }
}

/// Outcome of looking for one record version in a registry listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    Found,
    /// Parses fine but matches no known version
    Missing,
    /// Does not parse for the ecosystem; reported like a missing version
    Invalid,
    /// Skipped because the registry never lists such versions
    Unlisted,
}

impl VersionCheck {
    pub fn is_missing(&self) -> bool {
        matches!(self, VersionCheck::Missing | VersionCheck::Invalid)
    }
}

/// Whether `version` is the `introduced` value meaning "since the beginning of history"
pub fn is_origin_sentinel(version: &str) -> bool {
    version == "0"
}

/// Looks for `version` among the `known` registry versions
pub fn check_version(matcher: &dyn VersionMatcher, version: &str, known: &[String]) -> VersionCheck {
    if matcher.is_unlisted(version) {
        return VersionCheck::Unlisted;
    }
    if !matcher.is_valid(version) {
        return VersionCheck::Invalid;
    }
    if known
        .iter()
        .any(|candidate| matcher.is_same_version(version, candidate) == Some(true))
    {
        VersionCheck::Found
    } else {
        VersionCheck::Missing
    }
}

/// Confirms every version in `wanted` is among the `known` registry versions
///
/// Fails with [`VersionsError::Missing`] naming the missing or unparsable
/// record versions, the registry versions the matcher could not parse, and
/// the full known set.
pub fn find_missing_versions(
    matcher: &dyn VersionMatcher,
    package: &str,
    wanted: &[String],
    known: &[String],
) -> Result<(), VersionsError> {
    let missing: Vec<String> = wanted
        .iter()
        .filter(|v| check_version(matcher, v, known).is_missing())
        .cloned()
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let invalid = known
        .iter()
        .filter(|v| !matcher.is_valid(v))
        .cloned()
        .collect();

    Err(VersionsError::Missing {
        package: package.to_string(),
        ecosystem: matcher.ecosystem().to_string(),
        missing,
        invalid,
        known: known.to_vec(),
    })
}
