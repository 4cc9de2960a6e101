//! CRAN package database (crandb) implementation

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://crandb.r-pkg.org";

/// `/{pkg}/all` response; `versions` maps each release to its DESCRIPTION
#[derive(Debug, Deserialize)]
struct CranAllResponse {
    versions: IndexMap<String, IgnoredAny>,
}

pub struct CranRegistry {
    client: HttpClient,
    base_url: String,
}

impl CranRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Registry for CranRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Cran
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        probe(&self.client, &format!("{}/{}", self.base_url, package_name)).await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = format!("{}/{}/all", self.base_url, package_name);
        let response: CranAllResponse = fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(response.versions.into_keys().collect()))
    }
}
