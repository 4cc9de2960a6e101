use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP-related constants
// =============================================================================

/// Default timeout for a single registry request in milliseconds (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of attempts per request, including the first one
pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;

/// Delay before the first retry; doubled after every further attempt
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 250;

/// User agent sent to every registry (crates.io rejects anonymous clients)
pub const DEFAULT_USER_AGENT: &str = concat!("osv-linter/", env!("CARGO_PKG_VERSION"));

/// Version appended to a purl that fails to parse without one
pub const SYNTHETIC_PURL_VERSION: &str = "0.0.0";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parameters handed to every check for one invocation.
///
/// Checks only ever see a shared reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunConfig {
    pub verbose: bool,
    /// Ecosystems package checks are limited to; empty means unrestricted
    pub ecosystems: Vec<String>,
    /// Relax checks that reject ecosystems the schema does not know yet
    pub new_ecosystem: bool,
}

impl RunConfig {
    /// Whether package checks should look at `ecosystem` (already split at `:`)
    pub fn allows_ecosystem(&self, ecosystem: &str) -> bool {
        self.ecosystems.is_empty() || self.ecosystems.iter().any(|e| e == ecosystem)
    }
}

/// Linter configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LinterConfig {
    pub http: HttpConfig,
    pub registries: RegistriesConfig,
}

impl LinterConfig {
    /// Loads a JSON config file; absent fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read(path)?;
        Ok(serde_json::from_slice(&content)?)
    }
}

/// Retry and timeout settings for registry requests
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Registry-specific configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistriesConfig {
    pub cran: RegistryConfig,
    pub crates: RegistryConfig,
    pub go: RegistryConfig,
    pub go_toolchain: RegistryConfig,
    pub hackage: RegistryConfig,
    pub hex: RegistryConfig,
    pub julia: RegistryConfig,
    pub maven: RegistryConfig,
    pub npm: RegistryConfig,
    pub nuget: RegistryConfig,
    pub packagist: RegistryConfig,
    pub drupal: RegistryConfig,
    pub r#pub: RegistryConfig,
    pub pypi: RegistryConfig,
    pub rubygems: RegistryConfig,
}

/// Individual registry configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    pub enabled: bool,
    /// Replaces the public endpoint
    pub base_url: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
        }
    }
}

impl RegistryConfig {
    /// Base URL to use, falling back to the registry's public endpoint
    pub fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url.as_deref().unwrap_or(default)
    }
}
