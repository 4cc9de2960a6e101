//! Go module version matcher
//!
//! Go modules use exact version matching with optional suffixes:
//! - Standard semver: v1.2.3 (records usually drop the `v`)
//! - +incompatible suffix: v2.0.0+incompatible (pre-go.mod v2+ modules)
//! - Pseudo-versions: v0.0.0-20210101000000-abcdef123456

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

use crate::ecosystem::Ecosystem;
use crate::version::matcher::VersionMatcher;
use crate::version::matchers::semver::parse_version;

/// Pseudo-version grammar from the Go module reference
static PSEUDO_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?[0-9]+\.(0\.0-|\d+\.\d+-([^+]*\.)?0\.)\d{14}-[A-Za-z0-9]+(\+[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?$",
    )
    .expect("pseudo-version pattern is valid")
});

pub struct GoVersionMatcher;

impl VersionMatcher for GoVersionMatcher {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Go
    }

    fn is_valid(&self, version: &str) -> bool {
        parse_go_version(version).is_some()
    }

    fn is_same_version(&self, version: &str, candidate: &str) -> Option<bool> {
        let candidate = parse_go_version(candidate)?;
        Some(parse_go_version(version).is_some_and(|v| v == candidate))
    }

    fn is_unlisted(&self, version: &str) -> bool {
        // Pseudo-versions are commit-specific and not listed in /@v/list
        is_pseudo_version(version)
    }
}

/// Normalize a Go module version for comparison.
///
/// Handles:
/// - v prefix: v1.2.3 -> 1.2.3
/// - +incompatible suffix: v2.0.0+incompatible -> 2.0.0
fn normalize_go_version(version: &str) -> &str {
    let version = version.strip_prefix('v').unwrap_or(version);
    version.strip_suffix("+incompatible").unwrap_or(version)
}

/// Parses a normalized Go version, ignoring build metadata
fn parse_go_version(version: &str) -> Option<Version> {
    let mut parsed = parse_version(normalize_go_version(version))?;
    parsed.build = semver::BuildMetadata::EMPTY;
    Some(parsed)
}

/// Check if a version is a pseudo-version.
///
/// Pseudo-version formats:
/// - v0.0.0-YYYYMMDDHHMMSS-commit (no base version)
/// - vX.Y.Z-0.YYYYMMDDHHMMSS-commit (with release base version)
/// - vX.Y.Z-pre.0.YYYYMMDDHHMMSS-commit (with prerelease base version)
pub fn is_pseudo_version(version: &str) -> bool {
    version.matches('-').count() >= 2 && PSEUDO_VERSION.is_match(version)
}
