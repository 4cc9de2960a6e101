//! Matcher for ecosystems whose versions are plain lists of numbers
//!
//! CRAN separates components with `.` or `-` (`1.0-2`); Hackage only uses `.`.
//! Components are compared exactly, so `1.0` and `1.0.0` differ.

use crate::ecosystem::Ecosystem;
use crate::version::matcher::VersionMatcher;

pub struct NumericVersionMatcher {
    ecosystem: Ecosystem,
    separators: &'static [char],
}

impl NumericVersionMatcher {
    pub fn cran() -> Self {
        Self {
            ecosystem: Ecosystem::Cran,
            separators: &['.', '-'],
        }
    }

    pub fn hackage() -> Self {
        Self {
            ecosystem: Ecosystem::Hackage,
            separators: &['.'],
        }
    }

    fn components(&self, version: &str) -> Option<Vec<u64>> {
        version
            .split(self.separators)
            .map(|part| {
                if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                    return None;
                }
                part.parse().ok()
            })
            .collect()
    }
}

impl VersionMatcher for NumericVersionMatcher {
    fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    fn is_valid(&self, version: &str) -> bool {
        self.components(version).is_some()
    }

    fn is_same_version(&self, version: &str, candidate: &str) -> Option<bool> {
        let candidate = self.components(candidate)?;
        Some(self.components(version).is_some_and(|v| v == candidate))
    }
}
