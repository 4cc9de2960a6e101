//! npm registry API implementation

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

/// Default base URL for npm registry
pub const DEFAULT_BASE_URL: &str = "https://registry.npmjs.org";

/// Response from npm registry API
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    versions: IndexMap<String, IgnoredAny>,
}

/// Registry implementation for npm registry API
pub struct NpmRegistry {
    client: HttpClient,
    base_url: String,
}

impl NpmRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn package_url(&self, package_name: &str) -> String {
        format!("{}/{}", self.base_url, Self::encode_package_name(package_name))
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        probe(&self.client, &self.package_url(package_name)).await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = self.package_url(package_name);
        let package_info: NpmPackageResponse =
            fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(
            package_info.versions.into_keys().collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::registries::test_client;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_all_versions_returns_versions_in_registry_order() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/lodash")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "lodash",
                    "versions": {
                        "4.17.21": {},
                        "4.17.19": {},
                        "not-semver": {}
                    }
                }"#,
            )
            .create_async()
            .await;

        let registry = NpmRegistry::new(test_client(), &server.url());
        let result = registry.fetch_all_versions("lodash").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.versions, vec!["4.17.21", "4.17.19", "not-semver"]);
    }

    #[tokio::test]
    async fn fetch_all_versions_returns_not_found_for_nonexistent_package() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/nonexistent-package")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Not found"}"#)
            .create_async()
            .await;

        let registry = NpmRegistry::new(test_client(), &server.url());
        let result = registry.fetch_all_versions("nonexistent-package").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn package_exists_encodes_scoped_package() {
        let mut server = Server::new_async().await;

        // Scoped packages use URL encoding: @types/node -> @types%2Fnode
        let mock = server
            .mock("HEAD", "/@types%2Fnode")
            .with_status(200)
            .create_async()
            .await;

        let registry = NpmRegistry::new(test_client(), &server.url());

        assert!(registry.package_exists("@types/node").await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_all_versions_rejects_malformed_body() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/broken")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let registry = NpmRegistry::new(test_client(), &server.url());
        let result = registry.fetch_all_versions("broken").await;

        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }
}
