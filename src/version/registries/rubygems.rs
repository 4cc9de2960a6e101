//! RubyGems.org API implementation

use serde::Deserialize;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://rubygems.org/api/v1";

#[derive(Debug, Deserialize)]
struct GemVersion {
    number: String,
}

pub struct RubyGemsRegistry {
    client: HttpClient,
    base_url: String,
}

impl RubyGemsRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Registry for RubyGemsRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::RubyGems
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        probe(
            &self.client,
            &format!("{}/gems/{}.json", self.base_url, package_name),
        )
        .await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = format!("{}/versions/{}.json", self.base_url, package_name);
        let versions: Vec<GemVersion> = fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(
            versions.into_iter().map(|v| v.number).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::registries::test_client;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_all_versions_returns_version_numbers() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/versions/rails.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"number": "7.1.2", "platform": "ruby", "prerelease": false},
                    {"number": "7.1.0.rc1", "platform": "ruby", "prerelease": true}
                ]"#,
            )
            .create_async()
            .await;

        let registry = RubyGemsRegistry::new(test_client(), &server.url());
        let result = registry.fetch_all_versions("rails").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.versions, vec!["7.1.2", "7.1.0.rc1"]);
    }

    #[tokio::test]
    async fn package_exists_probes_gem_document() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("HEAD", "/gems/no-such-gem.json")
            .with_status(404)
            .create_async()
            .await;

        let registry = RubyGemsRegistry::new(test_client(), &server.url());

        assert!(!registry.package_exists("no-such-gem").await);
        mock.assert_async().await;
    }
}
