//! Registry implementations for probing packages and fetching their versions

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::http::HttpClient;
use crate::version::error::RegistryError;

pub mod cran;
pub mod crates_io;
pub mod go_proxy;
pub mod go_toolchain;
pub mod hackage;
pub mod hex;
pub mod julia;
pub mod maven;
pub mod npm;
pub mod nuget;
pub mod packagist;
pub mod pub_dev;
pub mod pypi;
pub mod rubygems;

pub use cran::CranRegistry;
pub use crates_io::CratesIoRegistry;
pub use go_proxy::GoProxyRegistry;
pub use go_toolchain::GoToolchainRegistry;
pub use hackage::HackageRegistry;
pub use hex::HexRegistry;
pub use julia::JuliaRegistry;
pub use maven::MavenRegistry;
pub use npm::NpmRegistry;
pub use nuget::NuGetRegistry;
pub use packagist::PackagistRegistry;
pub use pub_dev::PubRegistry;
pub use pypi::PypiRegistry;
pub use rubygems::RubyGemsRegistry;

/// Whether `url` answers 200; any other outcome means "does not exist"
pub(crate) async fn probe(client: &HttpClient, url: &str) -> bool {
    match client.head(url).await {
        Ok(response) => response.status() == StatusCode::OK,
        Err(e) => {
            debug!("Existence probe for {} failed: {}", url, e);
            false
        }
    }
}

/// GETs `url`, mapping 404/410 to [`RegistryError::NotFound`]
pub(crate) async fn fetch(
    client: &HttpClient,
    url: &str,
    package_name: &str,
) -> Result<Response, RegistryError> {
    let response = client.get(url).await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        return Err(RegistryError::NotFound(package_name.to_string()));
    }

    if !status.is_success() {
        warn!("Registry returned status {}: {}", status, url);
        return Err(RegistryError::Status {
            status,
            url: url.to_string(),
        });
    }

    Ok(response)
}

/// GETs `url` and decodes the JSON body as `T`
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &HttpClient,
    url: &str,
    package_name: &str,
) -> Result<T, RegistryError> {
    fetch(client, url, package_name)
        .await?
        .json::<T>()
        .await
        .map_err(|e| {
            warn!("Failed to parse registry response from {}: {}", url, e);
            RegistryError::InvalidResponse(e.to_string())
        })
}

/// Client without retries for mockito-backed tests
#[cfg(test)]
pub(crate) fn test_client() -> HttpClient {
    use crate::config::HttpConfig;

    HttpClient::new(&HttpConfig {
        max_attempts: 1,
        initial_backoff_ms: 1,
        ..Default::default()
    })
    .unwrap()
}
