//! NuGet version matcher
//!
//! NuGet versions have up to four numeric parts, an optional prerelease label
//! and build metadata that is ignored for equality. Labels compare
//! case-insensitively, and missing numeric parts are zero (`1.0` is `1.0.0.0`).

use crate::ecosystem::Ecosystem;
use crate::version::matcher::VersionMatcher;

#[derive(Debug, PartialEq, Eq)]
struct NuGetVersion {
    release: [u64; 4],
    prerelease: String,
}

impl NuGetVersion {
    fn parse(version: &str) -> Option<Self> {
        let version = version.split_once('+').map_or(version, |(v, _)| v);
        let (release, prerelease) = version.split_once('-').unwrap_or((version, ""));

        let parts: Vec<&str> = release.split('.').collect();
        if parts.is_empty() || parts.len() > 4 {
            return None;
        }
        let mut numbers = [0; 4];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            *slot = part.parse().ok()?;
        }

        let valid_label = prerelease
            .split('.')
            .all(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
        if !prerelease.is_empty() && !valid_label {
            return None;
        }

        Some(Self {
            release: numbers,
            prerelease: prerelease.to_ascii_lowercase(),
        })
    }
}

pub struct NuGetVersionMatcher;

impl VersionMatcher for NuGetVersionMatcher {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::NuGet
    }

    fn is_valid(&self, version: &str) -> bool {
        NuGetVersion::parse(version).is_some()
    }

    fn is_same_version(&self, version: &str, candidate: &str) -> Option<bool> {
        let candidate = NuGetVersion::parse(candidate)?;
        Some(NuGetVersion::parse(version).is_some_and(|v| v == candidate))
    }
}
