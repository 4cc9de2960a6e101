//! Hex (Erlang/Elixir) package registry implementation

use serde::Deserialize;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://hex.pm/api/packages";

#[derive(Debug, Deserialize)]
struct HexPackageResponse {
    releases: Vec<HexRelease>,
}

#[derive(Debug, Deserialize)]
struct HexRelease {
    version: String,
}

pub struct HexRegistry {
    client: HttpClient,
    base_url: String,
}

impl HexRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Registry for HexRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Hex
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        probe(&self.client, &format!("{}/{}", self.base_url, package_name)).await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = format!("{}/{}", self.base_url, package_name);
        let response: HexPackageResponse = fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(
            response.releases.into_iter().map(|r| r.version).collect(),
        ))
    }
}
