//! crates.io registry API implementation

use serde::Deserialize;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://crates.io/api/v1/crates";

/// Pseudo-crate for the Rust standard library; never published but always valid
const STD_CRATE: &str = "std";

#[derive(Debug, Deserialize)]
struct CratesIoResponse {
    versions: Vec<CrateVersion>,
}

#[derive(Debug, Deserialize)]
struct CrateVersion {
    num: String,
}

pub struct CratesIoRegistry {
    client: HttpClient,
    base_url: String,
}

impl CratesIoRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Registry for CratesIoRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::CratesIo
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        package_name == STD_CRATE
            || probe(&self.client, &format!("{}/{}", self.base_url, package_name)).await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = format!("{}/{}", self.base_url, package_name);
        let response: CratesIoResponse = fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(
            response.versions.into_iter().map(|v| v.num).collect(),
        ))
    }
}
