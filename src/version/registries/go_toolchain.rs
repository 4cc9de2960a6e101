//! Go toolchain release listing (`stdlib` and `toolchain` pseudo-modules)

use serde::Deserialize;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::fetch_json;
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://go.dev/dl";

#[derive(Debug, Deserialize)]
struct GoRelease {
    version: String,
}

/// Lists every Go release ever published, unstable ones included
pub struct GoToolchainRegistry {
    client: HttpClient,
    base_url: String,
}

impl GoToolchainRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Registry for GoToolchainRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Go
    }

    /// `stdlib` and `toolchain` always exist
    async fn package_exists(&self, _package_name: &str) -> bool {
        true
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = format!("{}/?mode=json&include=all", self.base_url);
        let releases: Vec<GoRelease> = fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(
            releases.into_iter().map(|r| r.version).collect(),
        ))
    }
}
