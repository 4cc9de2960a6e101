//! Package checks: registry existence, published versions and purl syntax

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexSet;
use packageurl::PackageUrl;
use tracing::debug;

use crate::checks::Check;
use crate::config::{RunConfig, SYNTHETIC_PURL_VERSION};
use crate::ecosystem::split_ecosystem;
use crate::record::{Field, Record};
use crate::version::matcher::is_origin_sentinel;
use crate::version::resolver::EcosystemResolvers;

const GIT_RANGE: &str = "GIT";

/// Package named by one affected entry, ecosystem already split at `:`
struct PackageRef<'a> {
    entry: Field<'a>,
    ecosystem: String,
    name: String,
}

/// Affected entries that name a package whose ecosystem is allowed
fn packages<'a>(record: &'a Record, config: &'a RunConfig) -> impl Iterator<Item = PackageRef<'a>> {
    record
        .get("affected")
        .iter()
        .filter(|entry| entry.get("package").exists())
        .filter_map(move |entry| {
            let ecosystem_field = entry.get("package.ecosystem").to_text();
            let (ecosystem, _) = split_ecosystem(&ecosystem_field);
            if !config.allows_ecosystem(ecosystem) {
                debug!("skipping package checks for ecosystem {}", ecosystem);
                return None;
            }
            Some(PackageRef {
                entry,
                ecosystem: ecosystem.to_string(),
                name: entry.get("package.name").to_text(),
            })
        })
}

/// Every referenced package exists in its ecosystem's registry
pub struct PackageExists {
    resolvers: Arc<EcosystemResolvers>,
}

impl PackageExists {
    pub fn new(resolvers: Arc<EcosystemResolvers>) -> Self {
        Self { resolvers }
    }
}

#[async_trait::async_trait]
impl Check for PackageExists {
    async fn run(&self, record: &Record, config: &RunConfig) -> Vec<String> {
        let mut findings = Vec::new();
        // (ecosystem, name) pairs already probed for this record
        let mut resolved = HashSet::new();

        for package in packages(record, config) {
            if !resolved.insert((package.ecosystem.clone(), package.name.clone())) {
                continue;
            }

            let Some(resolver) = self.resolvers.for_package(&package.ecosystem, &package.name)
            else {
                continue;
            };

            if !resolver.package_exists(&package.name).await {
                findings.push(format!(
                    "package {:?} not found in {:?}",
                    package.name, package.ecosystem
                ));
            }
        }

        findings
    }
}

/// Every version a package entry names is published in its registry
pub struct PackageVersionsExist {
    resolvers: Arc<EcosystemResolvers>,
}

impl PackageVersionsExist {
    pub fn new(resolvers: Arc<EcosystemResolvers>) -> Self {
        Self { resolvers }
    }
}

#[async_trait::async_trait]
impl Check for PackageVersionsExist {
    async fn run(&self, record: &Record, config: &RunConfig) -> Vec<String> {
        let mut findings = Vec::new();

        for package in packages(record, config) {
            let Some(resolver) = self.resolvers.for_package(&package.ecosystem, &package.name)
            else {
                continue;
            };

            let versions = implicated_versions(package.entry);
            if versions.is_empty() {
                continue;
            }

            if let Err(e) = resolver.verify_versions(&package.name, &versions).await {
                findings.push(format!(
                    "Failed to find some versions of {}: {}",
                    package.name, e
                ));
            }
        }

        findings
    }
}

/// Versions named by an affected entry's non-GIT range events and its
/// `versions` array, each named once
fn implicated_versions(entry: Field<'_>) -> Vec<String> {
    let mut versions = IndexSet::new();

    for range in entry.get("ranges").iter() {
        if range.get("type").as_str() == Some(GIT_RANGE) {
            continue;
        }
        for event in range.get("events").iter() {
            let introduced = event.get("introduced");
            if introduced.exists() && !is_origin_sentinel(&introduced.to_text()) {
                versions.insert(introduced.to_text());
            }
            for key in ["fixed", "last_affected"] {
                let value = event.get(key);
                if value.exists() {
                    versions.insert(value.to_text());
                }
            }
        }
    }

    versions.extend(entry.get("versions").strings());
    versions.into_iter().collect()
}

/// Every `package.purl` parses as a package URL
pub struct PackagePurlValid;

#[async_trait::async_trait]
impl Check for PackagePurlValid {
    async fn run(&self, record: &Record, _config: &RunConfig) -> Vec<String> {
        record
            .get("affected")
            .iter()
            .map(|entry| entry.get("package.purl"))
            .filter(Field::exists)
            .filter_map(|field| {
                let purl = field.to_text();
                validate_purl(&purl)
                    .err()
                    .map(|e| format!("Invalid Purl {purl:?}: {e}"))
            })
            .collect()
    }
}

/// Parses `purl`, retrying with a synthetic version when the first attempt
/// fails
///
/// The retry accepts purls that only lack a version component, at the cost
/// of hiding some genuinely malformed ones.
pub fn validate_purl(purl: &str) -> Result<(), packageurl::Error> {
    match PackageUrl::from_str(purl) {
        Ok(_) => Ok(()),
        Err(e) => PackageUrl::from_str(&with_synthetic_version(purl))
            .map(|_| ())
            .map_err(|_| e),
    }
}

/// Inserts `@<synthetic version>` before any qualifiers or subpath
fn with_synthetic_version(purl: &str) -> String {
    let end = purl.find(['?', '#']).unwrap_or(purl.len());
    format!("{}@{}{}", &purl[..end], SYNTHETIC_PURL_VERSION, &purl[end..])
}
