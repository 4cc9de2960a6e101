//! PyPI registry client for probing Python packages and fetching their releases

use std::sync::LazyLock;

use async_trait::async_trait;
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://pypi.org";

static NAME_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-_.]+").expect("separator pattern is valid")
});

/// PyPI registry client
pub struct PypiRegistry {
    client: HttpClient,
    base_url: String,
}

impl PypiRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn package_url(&self, package_name: &str) -> String {
        format!("{}/pypi/{}/json", self.base_url, normalize_name(package_name))
    }
}

/// PyPI JSON API response structure
#[derive(Debug, Deserialize)]
struct PypiResponse {
    releases: IndexMap<String, IgnoredAny>,
}

/// Normalizes a project name: runs of `-`, `_` and `.` become `-`, lowercased
fn normalize_name(package_name: &str) -> String {
    NAME_SEPARATORS
        .replace_all(package_name, "-")
        .to_lowercase()
}

#[async_trait]
impl Registry for PypiRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::PyPI
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        probe(&self.client, &self.package_url(package_name)).await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = self.package_url(package_name);
        let response: PypiResponse = fetch_json(&self.client, &url, package_name).await?;

        Ok(PackageVersions::new(response.releases.into_keys().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::registries::test_client;
    use mockito::Server;
    use rstest::rstest;

    #[rstest]
    #[case("Django", "django")]
    #[case("zope.interface", "zope-interface")]
    #[case("Foo__Bar-.baz", "foo-bar-baz")]
    fn normalize_name_follows_packaging_rules(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_name(input), expected);
    }

    #[tokio::test]
    async fn fetch_all_versions_returns_release_keys() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pypi/requests/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "info": {"name": "requests", "version": "2.31.0"},
                    "releases": {
                        "2.28.0": [],
                        "2.31.0": [{"filename": "requests-2.31.0.tar.gz"}]
                    }
                }"#,
            )
            .create_async()
            .await;

        let registry = PypiRegistry::new(test_client(), &server.url());
        let result = registry.fetch_all_versions("Requests").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.versions, vec!["2.28.0", "2.31.0"]);
    }

    #[tokio::test]
    async fn package_exists_returns_false_for_missing_project() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("HEAD", "/pypi/123bla/json")
            .with_status(404)
            .create_async()
            .await;

        let registry = PypiRegistry::new(test_client(), &server.url());

        assert!(!registry.package_exists("123bla").await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_all_versions_reports_server_errors() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/pypi/flaky/json")
            .with_status(503)
            .create_async()
            .await;

        let registry = PypiRegistry::new(test_client(), &server.url());
        let result = registry.fetch_all_versions("flaky").await;

        assert!(matches!(result, Err(RegistryError::Status { .. })));
    }
}
