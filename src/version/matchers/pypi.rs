//! PyPI version matcher using PEP 440 versions

use std::str::FromStr;

use pep508_rs::pep440_rs::Version;

use crate::ecosystem::Ecosystem;
use crate::version::matcher::VersionMatcher;

/// Version matcher for PyPI packages; `1.0` and `1.0.0` are the same release
pub struct PypiVersionMatcher;

impl VersionMatcher for PypiVersionMatcher {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::PyPI
    }

    fn is_valid(&self, version: &str) -> bool {
        Version::from_str(version).is_ok()
    }

    fn is_same_version(&self, version: &str, candidate: &str) -> Option<bool> {
        let candidate = Version::from_str(candidate).ok()?;
        Some(Version::from_str(version).is_ok_and(|v| v == candidate))
    }
}
