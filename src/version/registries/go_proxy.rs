//! Go proxy registry API implementation

use crate::ecosystem::Ecosystem;
use crate::http::HttpClient;
use crate::version::error::RegistryError;
use crate::version::registries::{fetch, probe};
use crate::version::registry::Registry;
use crate::version::types::PackageVersions;
use tracing::warn;

/// Default base URL for Go proxy
pub const DEFAULT_BASE_URL: &str = "https://proxy.golang.org";

/// Registry implementation for Go proxy API
pub struct GoProxyRegistry {
    client: HttpClient,
    base_url: String,
}

impl GoProxyRegistry {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn list_url(&self, module_path: &str) -> String {
        format!("{}/{}/@v/list", self.base_url, encode_module_path(module_path))
    }
}

#[async_trait::async_trait]
impl Registry for GoProxyRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Go
    }

    async fn package_exists(&self, package_name: &str) -> bool {
        probe(&self.client, &self.list_url(package_name)).await
    }

    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        let url = self.list_url(package_name);
        let response = fetch(&self.client, &url, package_name).await?;

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read Go proxy response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        // Go proxy returns versions one per line
        let versions: Vec<String> = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();

        Ok(PackageVersions::new(versions))
    }
}

/// Encode a module path for the proxy.
///
/// GitHub paths are case-insensitive and lowercased first; any remaining
/// uppercase letter is escaped as `!{lowercase}` (gopkg.in/Azure -> gopkg.in/!azure).
fn encode_module_path(path: &str) -> String {
    let path = if path.starts_with("github.com/") {
        path.to_lowercase()
    } else {
        path.to_string()
    };

    let mut result = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_uppercase() {
            result.push('!');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
