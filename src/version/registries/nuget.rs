//! NuGet V3 flat container implementation

use serde::Deserialize;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://api.nuget.org/v3-flatcontainer";

#[derive(Debug, Deserialize)]
struct NuGetIndexResponse {
    versions: Vec<String>,
}

pub struct NuGetRegistry {
    client: HttpClient,
    base_url: String,
}

impl NuGetRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The flat container only serves lowercased package ids
    fn index_url(&self, package_name: &str) -> String {
        format!(
            "{}/{}/index.json",
            self.base_url,
            package_name.to_lowercase()
        )
    }
}

#[async_trait::async_trait]
impl Registry for NuGetRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::NuGet
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        probe(&self.client, &self.index_url(package_name)).await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = self.index_url(package_name);
        let response: NuGetIndexResponse = fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(response.versions))
    }
}
