//! Packagist (Composer) version matcher
//!
//! Composer accepts an optional `v` prefix, up to four numeric components and
//! a stability suffix (`-beta2`, `-RC1`, `-p1`). `1.0` and `v1.0.0` name the
//! same release.

use crate::ecosystem::Ecosystem;
use crate::version::matcher::VersionMatcher;
use crate::version::matchers::tokens::{Token, tokenize, trim_release_zeros};

const SEPARATORS: &[char] = &['.', '-', '_', '+'];

pub struct PackagistVersionMatcher;

impl VersionMatcher for PackagistVersionMatcher {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Packagist
    }

    fn is_valid(&self, version: &str) -> bool {
        canonicalize(version).is_some()
    }

    fn is_same_version(&self, version: &str, candidate: &str) -> Option<bool> {
        let candidate = canonicalize(candidate)?;
        Some(canonicalize(version).is_some_and(|v| v == candidate))
    }
}

fn canonicalize(version: &str) -> Option<Vec<Token>> {
    let version = version
        .strip_prefix(['v', 'V'])
        .unwrap_or(version);
    if !version.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let tokens = tokenize(version, SEPARATORS)?
        .into_iter()
        .map(|token| match token {
            Token::Text(text) => stability(&text).map(|s| Token::Text(s.to_string())),
            number => Some(number),
        })
        .collect::<Option<Vec<_>>>()?;

    Some(trim_release_zeros(tokens))
}

/// Canonical spelling of a Composer stability flag
fn stability(flag: &str) -> Option<&'static str> {
    match flag {
        "a" | "alpha" => Some("alpha"),
        "b" | "beta" => Some("beta"),
        "rc" => Some("rc"),
        "p" | "pl" | "patch" => Some("patch"),
        "dev" => Some("dev"),
        "stable" => Some("stable"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.0.0", "v1.0.0", Some(true))]
    #[case("1.0", "1.0.0", Some(true))]
    #[case("2.3.1.0", "2.3.1", Some(true))]
    #[case("1.0.0-beta2", "1.0.0-b2", Some(true))]
    #[case("1.0.0-RC1", "1.0.0rc1", Some(true))]
    #[case("1.0.0-p1", "1.0.0-patch1", Some(true))]
    #[case("1.0.0", "1.0.1", Some(false))]
    #[case("1.0.0-beta1", "1.0.0", Some(false))]
    #[case("1.0.0", "dev-master", None)]
    fn is_same_version_returns_expected(
        #[case] version: &str,
        #[case] candidate: &str,
        #[case] expected: Option<bool>,
    ) {
        assert_eq!(
            PackagistVersionMatcher.is_same_version(version, candidate),
            expected
        );
    }

    #[rstest]
    #[case("8.9.1", true)]
    #[case("v10.2.0-alpha3", true)]
    #[case("dev-main", false)]
    #[case("1.0.0-foo", false)]
    #[case("", false)]
    fn is_valid_returns_expected(#[case] version: &str, #[case] expected: bool) {
        assert_eq!(PackagistVersionMatcher.is_valid(version), expected);
    }
}
