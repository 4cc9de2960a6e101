//! Pub (Dart/Flutter) package repository implementation

use serde::Deserialize;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://pub.dev/api/packages";

#[derive(Debug, Deserialize)]
struct PubPackageResponse {
    versions: Vec<PubVersion>,
}

#[derive(Debug, Deserialize)]
struct PubVersion {
    version: String,
}

pub struct PubRegistry {
    client: HttpClient,
    base_url: String,
}

impl PubRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Registry for PubRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pub
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        probe(&self.client, &format!("{}/{}", self.base_url, package_name)).await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = format!("{}/{}", self.base_url, package_name);
        let response: PubPackageResponse = fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(
            response.versions.into_iter().map(|v| v.version).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::registries::test_client;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_all_versions_returns_listed_versions() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/http")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "http",
                    "latest": {"version": "1.2.0"},
                    "versions": [{"version": "0.13.6"}, {"version": "1.2.0"}]
                }"#,
            )
            .create_async()
            .await;

        let registry = PubRegistry::new(test_client(), &server.url());
        let result = registry.fetch_all_versions("http").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.versions, vec!["0.13.6", "1.2.0"]);
    }
}
