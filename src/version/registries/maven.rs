//! Maven Central search (Solr) implementation
//!
//! Package names are `groupId:artifactId`.

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::fetch_json;
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;

pub const DEFAULT_BASE_URL: &str = "https://search.maven.org/solrsearch/select";

/// Page size for the `gav` core; Maven Central caps it at 200
const ROWS: usize = 200;

#[derive(Debug, Deserialize)]
struct SolrResponse {
    response: SolrResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolrResult {
    num_found: usize,
    #[serde(default)]
    docs: Vec<SolrDoc>,
}

#[derive(Debug, Deserialize)]
struct SolrDoc {
    v: String,
}

pub struct MavenRegistry {
    client: HttpClient,
    base_url: String,
}

impl MavenRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self, query: &str, extra: &[(&str, String)]) -> Result<Url, RegistryError> {
        let mut params = vec![("q", query.to_string()), ("wt", "json".to_string())];
        params.extend(extra.iter().map(|(k, v)| (*k, v.clone())));

        Url::parse_with_params(&self.base_url, &params)
            .map_err(|e| RegistryError::InvalidResponse(format!("invalid search URL: {e}")))
    }
}

/// Solr query for one artifact, or `None` when the name is not `group:artifact`
fn artifact_query(package_name: &str) -> Option<String> {
    let (group, artifact) = package_name.split_once(':')?;
    if group.is_empty() || artifact.is_empty() {
        return None;
    }
    Some(format!("g:{group} AND a:{artifact}"))
}

#[async_trait::async_trait]
impl Registry for MavenRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Maven
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        let Some(query) = artifact_query(package_name) else {
            return false;
        };
        let Ok(url) = self.search_url(&query, &[("rows", "0".to_string())]) else {
            return false;
        };

        match fetch_json::<SolrResponse>(&self.client, url.as_str(), package_name).await {
            Ok(result) => result.response.num_found > 0,
            Err(e) => {
                debug!("Maven search for {} failed: {}", package_name, e);
                false
            }
        }
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let query = artifact_query(package_name)
            .ok_or_else(|| RegistryError::NotFound(package_name.to_string()))?;

        let mut versions = Vec::new();
        loop {
            let url = self.search_url(
                &query,
                &[
                    ("core", "gav".to_string()),
                    ("rows", ROWS.to_string()),
                    ("start", versions.len().to_string()),
                ],
            )?;
            let page: SolrResponse = fetch_json(&self.client, url.as_str(), package_name).await?;

            let received = page.response.docs.len();
            versions.extend(page.response.docs.into_iter().map(|doc| doc.v));

            if received < ROWS || versions.len() >= page.response.num_found {
                break;
            }
        }

        if versions.is_empty() {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }
        Ok(PackageVersions::new(versions))
    }
}
