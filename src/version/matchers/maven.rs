//! Maven version matcher modelled on `ComparableVersion` canonical forms
//!
//! Qualifier aliases (`a`, `b`, `m`, `cr`) are expanded, release qualifiers
//! (`ga`, `final`, `release`) vanish, and trailing zeros are dropped, so
//! `1.0`, `1.0.0` and `1-final` are the same version.

use crate::ecosystem::Ecosystem;
use crate::version::matcher::VersionMatcher;
use crate::version::matchers::tokens::{Token, tokenize};

pub struct MavenVersionMatcher;

impl VersionMatcher for MavenVersionMatcher {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Maven
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
    let mut tokens: Vec<Token> = tokenize(version, &['.', '-', '_'])?
        .into_iter()
        .filter_map(|token| match token {
            Token::Text(text) => qualifier(&text).map(Token::Text),
            number => Some(number),
        })
        .collect();

    while tokens.last().is_some_and(Token::is_zero) {
        tokens.pop();
    }
    Some(tokens)
}

/// Canonical qualifier, or `None` for qualifiers equal to a plain release
fn qualifier(text: &str) -> Option<String> {
    let canonical = match text {
        "ga" | "final" | "release" => return None,
        "a" => "alpha",
        "b" => "beta",
        "m" => "milestone",
        "cr" => "rc",
        other => other,
    };
    Some(canonical.to_string())
}
