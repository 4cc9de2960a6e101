//! Julia General registry implementation

use indexmap::IndexMap;
use serde::de::IgnoredAny;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://juliahub.com/docs/General";

pub struct JuliaRegistry {
    client: HttpClient,
    base_url: String,
}

impl JuliaRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn versions_url(&self, package_name: &str) -> String {
        format!("{}/{}/versions.json", self.base_url, package_name)
    }
}

#[async_trait::async_trait]
impl Registry for JuliaRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Julia
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        probe(&self.client, &self.versions_url(package_name)).await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = self.versions_url(package_name);
        let versions: IndexMap<String, IgnoredAny> =
            fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(versions.into_keys().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::registries::test_client;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_all_versions_returns_keys_of_versions_document() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/HTTP/versions.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"1.10.0": {"git-tree-sha1": "abc"}, "0.9.17": {"yanked": true}}"#)
            .create_async()
            .await;

        let registry = JuliaRegistry::new(test_client(), &server.url());
        let result = registry.fetch_all_versions("HTTP").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.versions, vec!["1.10.0", "0.9.17"]);
    }
}
