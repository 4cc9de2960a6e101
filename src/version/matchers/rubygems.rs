//! RubyGems version matcher following `Gem::Version` segment rules

use crate::ecosystem::Ecosystem;
use crate::version::matcher::VersionMatcher;
use crate::version::matchers::tokens::{Token, tokenize, trim_release_zeros};

pub struct RubyGemsVersionMatcher;

impl VersionMatcher for RubyGemsVersionMatcher {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::RubyGems
    }

    fn is_valid(&self, version: &str) -> bool {
        canonicalize(version).is_some()
    }

    fn is_same_version(&self, version: &str, candidate: &str) -> Option<bool> {
        let candidate = canonicalize(candidate)?;
        Some(canonicalize(version).is_some_and(|v| v == candidate))
    }
}

/// Segments of a gem version; `-` starts a prerelease (`1.0-beta` is `1.0.pre.beta`)
fn canonicalize(version: &str) -> Option<Vec<Token>> {
    let version = version.trim();
    if !version.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let version = version.replace('-', ".pre.");
    Some(trim_release_zeros(tokenize(&version, &['.'])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.0", "1.0.0", Some(true))]
    #[case("7.0.2.3", "7.0.2.3", Some(true))]
    #[case("1.0.0.rc1", "1.0.0.rc1", Some(true))]
    #[case("1.0.0.rc1", "1.0.0.RC1", Some(true))]
    #[case("1.0.0-beta", "1.0.0.pre.beta", Some(true))]
    #[case("1.0.0", "1.0.0.rc1", Some(false))]
    #[case("1.0.0", "one", None)]
    fn is_same_version_returns_expected(
        #[case] version: &str,
        #[case] candidate: &str,
        #[case] expected: Option<bool>,
    ) {
        assert_eq!(
            RubyGemsVersionMatcher.is_same_version(version, candidate),
            expected
        );
    }
}
