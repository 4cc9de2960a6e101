//! Per-ecosystem resolution: which matcher and registry answer for a package
//!
//! Ecosystems without an entry fall back to the default behavior: the package
//! is assumed to exist and its versions are not checked.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{LinterConfig, RegistryConfig};
use crate::ecosystem::{Ecosystem, split_ecosystem};
use crate::http::HttpClient;
use crate::version::error::VersionsError;
use crate::version::matcher::{VersionMatcher, find_missing_versions};
use crate::version::matchers::{
    GoToolchainMatcher, GoVersionMatcher, MavenVersionMatcher, NuGetVersionMatcher,
    NumericVersionMatcher, PackagistVersionMatcher, PypiVersionMatcher, RubyGemsVersionMatcher,
    SemverMatcher,
};
use crate::version::registries::{
    CranRegistry, CratesIoRegistry, GoProxyRegistry, GoToolchainRegistry, HackageRegistry,
    HexRegistry, JuliaRegistry, MavenRegistry, NpmRegistry, NuGetRegistry, PackagistRegistry,
    PubRegistry, PypiRegistry, RubyGemsRegistry, cran, crates_io, go_proxy, go_toolchain,
    hackage, hex, julia, maven, npm, nuget, packagist, pub_dev, pypi, rubygems,
};
use crate::version::registry::Registry;

/// Go pseudo-modules served by the toolchain release listing
const GO_TOOLCHAIN_PACKAGES: [&str; 2] = ["stdlib", "toolchain"];

/// Ecosystems with a registry adapter
const SUPPORTED_ECOSYSTEMS: [Ecosystem; 13] = [
    Ecosystem::Cran,
    Ecosystem::CratesIo,
    Ecosystem::Go,
    Ecosystem::Hackage,
    Ecosystem::Hex,
    Ecosystem::Julia,
    Ecosystem::Maven,
    Ecosystem::Npm,
    Ecosystem::NuGet,
    Ecosystem::Packagist,
    Ecosystem::Pub,
    Ecosystem::PyPI,
    Ecosystem::RubyGems,
];

/// Ecosystems the package checks can verify against a live registry
pub fn supported_ecosystems() -> &'static [Ecosystem] {
    &SUPPORTED_ECOSYSTEMS
}

/// Groups the matcher and registry that together validate packages of one ecosystem
pub struct PackageResolver {
    matcher: Arc<dyn VersionMatcher>,
    registry: Arc<dyn Registry>,
}

impl PackageResolver {
    pub fn new(matcher: Arc<dyn VersionMatcher>, registry: Arc<dyn Registry>) -> Self {
        Self { matcher, registry }
    }

    /// Get the version matcher for this ecosystem
    pub fn matcher(&self) -> &Arc<dyn VersionMatcher> {
        &self.matcher
    }

    /// Get the registry for probing packages and fetching versions
    pub fn registry(&self) -> &Arc<dyn Registry> {
        &self.registry
    }

    pub async fn package_exists(&self, package_name: &str) -> bool {
        self.registry.package_exists(package_name).await
    }

    /// Confirms every version in `versions` is published for `package_name`
    pub async fn verify_versions(
        &self,
        package_name: &str,
        versions: &[String],
    ) -> Result<(), VersionsError> {
        let known = self
            .registry
            .fetch_all_versions(package_name)
            .await
            .map_err(|source| VersionsError::Unreachable {
                package: package_name.to_string(),
                ecosystem: self.registry.ecosystem().to_string(),
                source,
            })?;

        // Modules that were never tagged have an empty proxy listing
        if known.is_empty() && self.registry.ecosystem() == Ecosystem::Go {
            return Ok(());
        }

        find_missing_versions(
            self.matcher.as_ref(),
            package_name,
            versions,
            &known.versions,
        )
    }
}

/// Lookup table from ecosystem to resolver
#[derive(Default)]
pub struct EcosystemResolvers {
    resolvers: HashMap<Ecosystem, PackageResolver>,
    go_toolchain: Option<PackageResolver>,
}

impl EcosystemResolvers {
    /// A table with no adapters; every package takes the default path
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `resolver` for the ecosystem its registry serves
    pub fn insert(&mut self, resolver: PackageResolver) {
        self.resolvers
            .insert(resolver.registry().ecosystem(), resolver);
    }

    /// Registers the resolver for Go's `stdlib` and `toolchain` packages
    pub fn set_go_toolchain(&mut self, resolver: PackageResolver) {
        self.go_toolchain = Some(resolver);
    }

    fn register<R>(
        &mut self,
        settings: &RegistryConfig,
        default_url: &str,
        matcher: impl VersionMatcher + 'static,
        build: impl FnOnce(&str) -> R,
    ) where
        R: Registry + 'static,
    {
        if settings.enabled {
            let registry = build(settings.base_url_or(default_url));
            self.insert(PackageResolver::new(Arc::new(matcher), Arc::new(registry)));
        }
    }

    /// Builds every enabled adapter from `config`
    pub fn from_config(config: &LinterConfig) -> Result<Self, reqwest::Error> {
        let client = HttpClient::new(&config.http)?;
        let registries = &config.registries;
        let mut resolvers = Self::new();

        resolvers.register(
            &registries.cran,
            cran::DEFAULT_BASE_URL,
            NumericVersionMatcher::cran(),
            |url| CranRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.crates,
            crates_io::DEFAULT_BASE_URL,
            SemverMatcher::new(Ecosystem::CratesIo),
            |url| CratesIoRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.go,
            go_proxy::DEFAULT_BASE_URL,
            GoVersionMatcher,
            |url| GoProxyRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.hackage,
            hackage::DEFAULT_BASE_URL,
            NumericVersionMatcher::hackage(),
            |url| HackageRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.hex,
            hex::DEFAULT_BASE_URL,
            SemverMatcher::new(Ecosystem::Hex),
            |url| HexRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.julia,
            julia::DEFAULT_BASE_URL,
            SemverMatcher::lenient(Ecosystem::Julia),
            |url| JuliaRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.maven,
            maven::DEFAULT_BASE_URL,
            MavenVersionMatcher,
            |url| MavenRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.npm,
            npm::DEFAULT_BASE_URL,
            SemverMatcher::new(Ecosystem::Npm),
            |url| NpmRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.nuget,
            nuget::DEFAULT_BASE_URL,
            NuGetVersionMatcher,
            |url| NuGetRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.r#pub,
            pub_dev::DEFAULT_BASE_URL,
            SemverMatcher::new(Ecosystem::Pub),
            |url| PubRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.pypi,
            pypi::DEFAULT_BASE_URL,
            PypiVersionMatcher,
            |url| PypiRegistry::new(client.clone(), url),
        );
        resolvers.register(
            &registries.rubygems,
            rubygems::DEFAULT_BASE_URL,
            RubyGemsVersionMatcher,
            |url| RubyGemsRegistry::new(client.clone(), url),
        );

        if registries.packagist.enabled {
            let drupal = registries
                .drupal
                .enabled
                .then(|| registries.drupal.base_url_or(packagist::DRUPAL_BASE_URL));
            resolvers.insert(PackageResolver::new(
                Arc::new(PackagistVersionMatcher),
                Arc::new(PackagistRegistry::new(
                    client.clone(),
                    registries.packagist.base_url_or(packagist::DEFAULT_BASE_URL),
                    drupal,
                )),
            ));
        }

        if registries.go_toolchain.enabled {
            resolvers.set_go_toolchain(PackageResolver::new(
                Arc::new(GoToolchainMatcher),
                Arc::new(GoToolchainRegistry::new(
                    client,
                    registries
                        .go_toolchain
                        .base_url_or(go_toolchain::DEFAULT_BASE_URL),
                )),
            ));
        }

        Ok(resolvers)
    }

    /// Resolver for `package_name` in `ecosystem` (suffix after `:` ignored);
    /// `None` means the default behavior applies
    pub fn for_package(&self, ecosystem: &str, package_name: &str) -> Option<&PackageResolver> {
        let (base, _) = split_ecosystem(ecosystem);
        let ecosystem: Ecosystem = base.parse().ok()?;

        if ecosystem == Ecosystem::Go && GO_TOOLCHAIN_PACKAGES.contains(&package_name) {
            return self.go_toolchain.as_ref();
        }
        self.resolvers.get(&ecosystem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::error::RegistryError;
    use crate::version::registry::MockRegistry;
    use crate::version::types::PackageVersions;
    use rstest::rstest;

    fn resolver_with(
        ecosystem: Ecosystem,
        matcher: Arc<dyn VersionMatcher>,
        result: fn() -> Result<PackageVersions, RegistryError>,
    ) -> PackageResolver {
        let mut registry = MockRegistry::new();
        registry.expect_ecosystem().return_const(ecosystem);
        registry
            .expect_fetch_all_versions()
            .returning(move |_| result());
        PackageResolver::new(matcher, Arc::new(registry))
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn verify_versions_passes_when_all_versions_exist() {
        let resolver = resolver_with(Ecosystem::PyPI, Arc::new(PypiVersionMatcher), || {
            Ok(PackageVersions::new(strings(&["1.0", "2.0.0"])))
        });

        let result = resolver
            .verify_versions("django", &strings(&["1.0.0", "2.0"]))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn verify_versions_reports_missing_versions() {
        let resolver = resolver_with(Ecosystem::PyPI, Arc::new(PypiVersionMatcher), || {
            Ok(PackageVersions::new(strings(&["1.0"])))
        });

        let result = resolver
            .verify_versions("django", &strings(&["1.0", "9.9"]))
            .await;

        assert!(matches!(
            result,
            Err(VersionsError::Missing { ref missing, .. }) if *missing == strings(&["9.9"])
        ));
    }

    #[tokio::test]
    async fn verify_versions_reports_unreachable_registry() {
        let resolver = resolver_with(Ecosystem::Npm, Arc::new(SemverMatcher::new(Ecosystem::Npm)), || {
            Err(RegistryError::NotFound("left-pad".to_string()))
        });

        let result = resolver.verify_versions("left-pad", &strings(&["1.0.0"])).await;

        assert!(matches!(
            result,
            Err(VersionsError::Unreachable {
                source: RegistryError::NotFound(_),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn verify_versions_accepts_empty_go_listing() {
        let resolver = resolver_with(Ecosystem::Go, Arc::new(GoVersionMatcher), || {
            Ok(PackageVersions::default())
        });

        let result = resolver
            .verify_versions("github.com/nanobox-io/golang-nanoauth", &strings(&["1.0.0"]))
            .await;

        assert!(result.is_ok());
    }

    #[rstest]
    #[case("PyPI", "requests", Some(Ecosystem::PyPI))]
    #[case("npm", "left-pad", Some(Ecosystem::Npm))]
    #[case("Go", "golang.org/x/text", Some(Ecosystem::Go))]
    #[case("Debian:11", "openssl", None)]
    #[case("NotAnEcosystem", "pkg", None)]
    fn for_package_routes_by_ecosystem(
        #[case] ecosystem: &str,
        #[case] package: &str,
        #[case] expected: Option<Ecosystem>,
    ) {
        let resolvers = EcosystemResolvers::from_config(&LinterConfig::default()).unwrap();

        assert_eq!(
            resolvers
                .for_package(ecosystem, package)
                .map(|r| r.matcher().ecosystem()),
            expected
        );
    }

    #[test]
    fn for_package_routes_go_stdlib_to_toolchain_listing() {
        let resolvers = EcosystemResolvers::from_config(&LinterConfig::default()).unwrap();

        let stdlib = resolvers.for_package("Go", "stdlib").unwrap();

        assert!(stdlib.matcher().is_same_version("1.20.0-0", "go1.20").unwrap());
    }

    #[test]
    fn disabled_registries_take_the_default_path() {
        let mut config = LinterConfig::default();
        config.registries.pypi = RegistryConfig {
            enabled: false,
            base_url: None,
        };
        config.registries.go_toolchain.enabled = false;

        let resolvers = EcosystemResolvers::from_config(&config).unwrap();

        assert!(resolvers.for_package("PyPI", "requests").is_none());
        assert!(resolvers.for_package("Go", "stdlib").is_none());
        assert!(resolvers.for_package("Go", "golang.org/x/net").is_some());
    }

    #[test]
    fn supported_ecosystems_have_resolvers_by_default() {
        let resolvers = EcosystemResolvers::from_config(&LinterConfig::default()).unwrap();

        for ecosystem in supported_ecosystems() {
            assert!(resolvers.for_package(ecosystem.as_str(), "pkg").is_some());
        }
    }
}
