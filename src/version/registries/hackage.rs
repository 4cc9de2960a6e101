//! Hackage package index implementation

use indexmap::IndexMap;
use serde::de::IgnoredAny;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://hackage.haskell.org/package";

pub struct HackageRegistry {
    client: HttpClient,
    base_url: String,
}

impl HackageRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Registry for HackageRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Hackage
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        probe(&self.client, &format!("{}/{}", self.base_url, package_name)).await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        // `{pkg}.json` maps every version to its status ("normal", "deprecated")
        let url = format!("{}/{}.json", self.base_url, package_name);
        let versions: IndexMap<String, IgnoredAny> =
            fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(versions.into_keys().collect()))
    }
}
