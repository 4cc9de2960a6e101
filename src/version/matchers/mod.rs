//! Ecosystem-specific version matchers

pub mod go;
pub mod go_toolchain;
pub mod maven;
pub mod nuget;
pub mod numeric;
pub mod packagist;
pub mod pypi;
pub mod rubygems;
pub mod semver;
pub mod tokens;

pub use go::GoVersionMatcher;
pub use go_toolchain::GoToolchainMatcher;
pub use maven::MavenVersionMatcher;
pub use nuget::NuGetVersionMatcher;
pub use numeric::NumericVersionMatcher;
pub use packagist::PackagistVersionMatcher;
pub use pypi::PypiVersionMatcher;
pub use rubygems::RubyGemsVersionMatcher;
pub use self::semver::SemverMatcher;
