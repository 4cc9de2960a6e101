//! Semantic-versioning matchers shared by npm, crates.io, Hex, Pub and Julia

use semver::Version;

use crate::ecosystem::Ecosystem;
use crate::version::matcher::VersionMatcher;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros.
/// Does NOT strip 'v' prefix.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Semver comparison; build metadata is part of the identity
pub struct SemverMatcher {
    ecosystem: Ecosystem,
    lenient: bool,
}

impl SemverMatcher {
    /// Requires all three version components
    pub fn new(ecosystem: Ecosystem) -> Self {
        Self {
            ecosystem,
            lenient: false,
        }
    }

    /// Pads partial versions (`1.2` is `1.2.0`)
    pub fn lenient(ecosystem: Ecosystem) -> Self {
        Self {
            ecosystem,
            lenient: true,
        }
    }

    fn parse(&self, version: &str) -> Option<Version> {
        if self.lenient {
            parse_version(version)
        } else {
            Version::parse(version).ok()
        }
    }
}

impl VersionMatcher for SemverMatcher {
    fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    fn is_valid(&self, version: &str) -> bool {
        self.parse(version).is_some()
    }

    fn is_same_version(&self, version: &str, candidate: &str) -> Option<bool> {
        let candidate = self.parse(candidate)?;
        Some(self.parse(version).is_some_and(|v| v == candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some("1.0.0"))]
    #[case("1.2", Some("1.2.0"))]
    #[case("1.2.3", Some("1.2.3"))]
    #[case("1.2.3-rc.1", Some("1.2.3-rc.1"))]
    #[case("v1.2.3", None)]
    #[case("invalid", None)]
    fn parse_version_pads_partial_versions(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            parse_version(input).map(|v| v.to_string()),
            expected.map(String::from)
        );
    }

    #[rstest]
    #[case("1.0.0", "1.0.0", Some(true))]
    #[case("1.0.0", "1.0.1", Some(false))]
    #[case("1.0.0-beta.1", "1.0.0-beta.1", Some(true))]
    #[case("1.0.0", "1.0.0+build.5", Some(false))]
    #[case("1.0", "1.0.0", Some(false))]
    #[case("1.0.0", "1.0", None)]
    #[case("1.0.0", "latest", None)]
    fn is_same_version_returns_expected(
        #[case] version: &str,
        #[case] candidate: &str,
        #[case] expected: Option<bool>,
    ) {
        let matcher = SemverMatcher::new(Ecosystem::Npm);
        assert_eq!(matcher.is_same_version(version, candidate), expected);
    }

    #[rstest]
    #[case("1.2.3", true)]
    #[case("0.0.0-alpha", true)]
    #[case("1.2", false)]
    #[case("v1.2.3", false)]
    fn is_valid_requires_full_semver(#[case] version: &str, #[case] expected: bool) {
        assert_eq!(SemverMatcher::new(Ecosystem::CratesIo).is_valid(version), expected);
    }

    #[test]
    fn lenient_matcher_pads_partial_versions() {
        let matcher = SemverMatcher::lenient(Ecosystem::Julia);
        assert!(matcher.is_valid("1.2"));
        assert_eq!(matcher.is_same_version("1.2", "1.2.0"), Some(true));
    }
}
