//! Registry trait for querying package existence and versions

#[cfg(test)]
use mockall::automock;

use crate::ecosystem::Ecosystem;
use crate::version::error::RegistryError;
use crate::version::types::PackageVersions;

/// Trait for querying one ecosystem's package registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the ecosystem this registry serves
    fn ecosystem(&self) -> Ecosystem;

    /// Probes whether the package exists
    ///
    /// Transport failures count as "does not exist": a record pointing at a
    /// package nobody can reach is reported rather than silently passed.
    async fn package_exists(&self, package_name: &str) -> bool;

    /// Fetches all published versions of a package
    ///
    /// # Returns
    /// * `Ok(PackageVersions)` - Known versions; may be empty for unreleased packages
    /// * `Err(RegistryError)` - If the registry could not be asked or does not know the package
    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError>;
}
