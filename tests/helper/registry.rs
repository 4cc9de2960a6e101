//! Registry test utilities

use std::path::Path;
use std::sync::Arc;

use osv_linter::checks::{CheckDef, CheckRegistry};
use osv_linter::config::{HttpConfig, LinterConfig, RegistriesConfig, RegistryConfig};
use osv_linter::linter::select_checks;
use osv_linter::version::resolver::EcosystemResolvers;

fn disabled() -> RegistryConfig {
    RegistryConfig {
        enabled: false,
        base_url: None,
    }
}

/// Config with every registry switched off and no retries
pub fn offline_config() -> LinterConfig {
    LinterConfig {
        http: HttpConfig {
            max_attempts: 1,
            ..Default::default()
        },
        registries: RegistriesConfig {
            cran: disabled(),
            crates: disabled(),
            go: disabled(),
            go_toolchain: disabled(),
            hackage: disabled(),
            hex: disabled(),
            julia: disabled(),
            maven: disabled(),
            npm: disabled(),
            nuget: disabled(),
            packagist: disabled(),
            drupal: disabled(),
            r#pub: disabled(),
            pypi: disabled(),
            rubygems: disabled(),
        },
    }
}

/// Config whose only registry is PyPI, served from `base_url`
pub fn pypi_config(base_url: &str) -> LinterConfig {
    let mut config = offline_config();
    config.registries.pypi = RegistryConfig {
        enabled: true,
        base_url: Some(base_url.to_string()),
    };
    config
}

/// Check registry built from `config` against the bundled schema
pub fn create_check_registry(config: &LinterConfig) -> CheckRegistry {
    let resolvers = EcosystemResolvers::from_config(config).unwrap();
    CheckRegistry::with_embedded_schema(Arc::new(resolvers)).unwrap()
}

/// Checks selected by code, name or prefix
pub fn checks(registry: &CheckRegistry, codes: &[&str]) -> Vec<Arc<CheckDef>> {
    let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
    select_checks(registry, &codes, "ALL").unwrap()
}

/// Writes `json` to `dir/name` and returns the path as linted
pub fn write_record(dir: &Path, name: &str, json: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path.display().to_string()
}
