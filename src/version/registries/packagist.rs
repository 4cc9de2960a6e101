//! Packagist (Composer v2) repository implementation
//!
//! Package documents live at the repository's `metadata-url`, announced in its
//! `packages.json` and resolved once per registry. Most `drupal/*` packages are
//! published in the Drupal repository instead, so that one is asked first.

use indexmap::IndexMap;
use reqwest::Url;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch_json, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://packagist.org";
pub const DRUPAL_BASE_URL: &str = "https://packages.drupal.org/files/packages/8";

const PACKAGE_PLACEHOLDER: &str = "%package%";

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    #[serde(rename = "metadata-url")]
    metadata_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageDocument {
    #[serde(default)]
    packages: IndexMap<String, Vec<PackageRelease>>,
}

#[derive(Debug, Deserialize)]
struct PackageRelease {
    version: String,
}

pub struct PackagistRegistry {
    client: HttpClient,
    repository: String,
    /// Drupal repository root; `None` skips the Drupal lookup
    drupal_repository: Option<String>,
    metadata_url: OnceCell<String>,
}

impl PackagistRegistry {
    pub fn new(client: HttpClient, repository: &str, drupal_repository: Option<&str>) -> Self {
        Self {
            client,
            repository: repository.trim_end_matches('/').to_string(),
            drupal_repository: drupal_repository.map(|r| r.trim_end_matches('/').to_string()),
            metadata_url: OnceCell::new(),
        }
    }

    /// Absolute metadata-url template of the main repository
    async fn metadata_url(&self) -> Result<&str, RegistryError> {
        self.metadata_url
            .get_or_try_init(|| async {
                let url = format!("{}/packages.json", self.repository);
                let info: RepositoryInfo = fetch_json(&self.client, &url, &self.repository).await?;
                let template = info.metadata_url.ok_or_else(|| {
                    RegistryError::InvalidResponse(format!("{url} has no metadata-url"))
                })?;
                absolute_url(&self.repository, &template)
            })
            .await
            .map(String::as_str)
    }

    async fn package_url(&self, package_name: &str) -> Result<String, RegistryError> {
        let template = self.metadata_url().await?;
        Ok(template.replace(PACKAGE_PLACEHOLDER, package_name))
    }

    fn drupal_url(&self, package_name: &str) -> Option<String> {
        if !package_name.starts_with("drupal/") {
            return None;
        }
        let repository = self.drupal_repository.as_deref()?;
        Some(format!("{repository}/p2/{package_name}.json"))
    }

    async fn fetch_versions_from(
        &self,
        url: &str,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let mut document: PackageDocument = fetch_json(&self.client, url, package_name).await?;
        let releases = document
            .packages
            .swap_remove(package_name)
            .ok_or_else(|| RegistryError::NotFound(package_name.to_string()))?;

        Ok(PackageVersions::new(
            releases.into_iter().map(|r| r.version).collect(),
        ))
    }
}

/// Resolves a metadata-url template that may be relative to the repository host
fn absolute_url(repository: &str, template: &str) -> Result<String, RegistryError> {
    if template.starts_with("http") {
        return Ok(template.to_string());
    }
    let parsed = Url::parse(repository)
        .map_err(|e| RegistryError::InvalidResponse(format!("invalid repository URL: {e}")))?;
    Ok(format!("{}{}", parsed.origin().ascii_serialization(), template))
}

#[async_trait::async_trait]
impl Registry for PackagistRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Packagist
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        if let Some(url) = self.drupal_url(package_name)
            && probe(&self.client, &url).await
        {
            return true;
        }

        match self.package_url(package_name).await {
            Ok(url) => probe(&self.client, &url).await,
            Err(e) => {
                debug!("Unable to resolve Packagist metadata-url: {}", e);
                false
            }
        }
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        if let Some(url) = self.drupal_url(package_name) {
            // Not every drupal/* package is in the Drupal repository
            match self.fetch_versions_from(&url, package_name).await {
                Err(RegistryError::NotFound(_)) => {
                    debug!("{} not in Drupal repository, trying Packagist", package_name);
                }
                result => return result,
            }
        }

        let url = self.package_url(package_name).await?;
        self.fetch_versions_from(&url, package_name).await
    }
}
