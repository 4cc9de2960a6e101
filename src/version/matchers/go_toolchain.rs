//! Go standard library / toolchain version matcher
//!
//! Records spell Go releases as semver (`1.21.0`); go.dev lists them as
//! `go1.21.0`, with the first release of a minor line historically named
//! without a patch (`go1.20`). Records mark such releases with a `-0`
//! prerelease: `1.20.0-0` is `go1.20` and `1.20.5-0` is `go1.20.5`.

use crate::ecosystem::Ecosystem;
use crate::version::matcher::VersionMatcher;
use crate::version::matchers::semver::parse_version;

pub struct GoToolchainMatcher;

impl VersionMatcher for GoToolchainMatcher {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Go
    }

    fn is_valid(&self, version: &str) -> bool {
        parse_version(version).is_some()
    }

    fn is_same_version(&self, version: &str, candidate: &str) -> Option<bool> {
        let release = candidate.strip_prefix("go")?;
        Some(release_names(version).iter().any(|name| name == release))
    }
}

/// Release names the go.dev listing may use for a record version
fn release_names(version: &str) -> Vec<String> {
    let mut names = vec![version.to_string()];
    let Some(parsed) = parse_version(version) else {
        return names;
    };
    if parsed.pre.as_str() != "0" {
        return names;
    }

    if parsed.patch == 0 {
        names.push(format!("{}.{}", parsed.major, parsed.minor));
    }
    names.push(format!("{}.{}.{}", parsed.major, parsed.minor, parsed.patch));
    names
}
