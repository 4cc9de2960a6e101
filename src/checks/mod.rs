//! Lint checks and the registry of named check collections
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ CheckRegistry │────▶│  CheckDef   │────▶│    Check    │
//! │ (code, name,  │     │ (code-tags  │     │ (record →   │
//! │  collections) │     │  findings)  │     │  messages)  │
//! └───────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Codes are grouped by prefix: `REC:` record shape, `RNG:` ranges,
//! `PKG:` packages against live registries, `SCH:` schema conformance.

pub mod packages;
pub mod ranges;
pub mod record;
pub mod schema;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::record::Record;
use crate::version::resolver::EcosystemResolvers;

pub use self::packages::{PackageExists, PackagePurlValid, PackageVersionsExist};
pub use self::ranges::{IntroducedEventExists, RangeIsDistinct};
pub use self::record::{AffectedDataExists, ValidAliases, ValidRelated, ValidUpstream};
pub use self::schema::{ConformsToSchema, SchemaError};

/// Collection holding every check
pub const ALL_COLLECTION: &str = "ALL";

/// Collection that never touches the network
pub const OFFLINE_COLLECTION: &str = "offline";

/// Collection gating imports into OSV.dev
pub const OSV_DEV_COLLECTION: &str = "osv.dev";

/// A rule evaluated against one record
///
/// Returns one message per violation, in discovery order. Implementations
/// keep no state between calls.
#[async_trait::async_trait]
pub trait Check: Send + Sync {
    async fn run(&self, record: &Record, config: &RunConfig) -> Vec<String>;
}

/// One rule violation found in a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Finding {
    pub code: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A check bound to its stable code, name and description
#[derive(Clone)]
pub struct CheckDef {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    check: Arc<dyn Check>,
}

impl CheckDef {
    pub fn new(
        code: &'static str,
        name: &'static str,
        description: &'static str,
        check: impl Check + 'static,
    ) -> Self {
        Self {
            code,
            name,
            description,
            check: Arc::new(check),
        }
    }

    /// Runs the check and tags every message with this definition's code
    pub async fn run(&self, record: &Record, config: &RunConfig) -> Vec<Finding> {
        self.check
            .run(record, config)
            .await
            .into_iter()
            .map(|message| Finding {
                code: self.code.to_string(),
                message,
            })
            .collect()
    }
}

impl fmt::Debug for CheckDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckDef")
            .field("code", &self.code)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A named, ordered set of checks run together
#[derive(Debug, Clone)]
pub struct Collection {
    pub name: &'static str,
    pub description: &'static str,
    pub checks: Vec<Arc<CheckDef>>,
}

/// Every known check and collection, built once per process
#[derive(Debug)]
pub struct CheckRegistry {
    checks: IndexMap<&'static str, Arc<CheckDef>>,
    collections: IndexMap<&'static str, Collection>,
}

impl CheckRegistry {
    /// Builds the registry; package checks resolve registries through
    /// `resolvers`, the schema check compiles `schema`
    pub fn new(resolvers: Arc<EcosystemResolvers>, schema: &[u8]) -> Result<Self, SchemaError> {
        let definitions = vec![
            CheckDef::new(
                "REC:001",
                "affected-data-exists",
                "every record has affected data",
                AffectedDataExists,
            ),
            CheckDef::new(
                "REC:002",
                "valid-aliases",
                "aliases are unique and do not name the record itself",
                ValidAliases,
            ),
            CheckDef::new(
                "REC:003",
                "valid-related",
                "related entries are unique and do not name the record itself",
                ValidRelated,
            ),
            CheckDef::new(
                "REC:004",
                "valid-upstream",
                "upstream entries are unique, do not name the record itself and do not repeat aliases or related entries",
                ValidUpstream,
            ),
            CheckDef::new(
                "RNG:001",
                "introduced-event-exists",
                "every range has an introduced event",
                IntroducedEventExists,
            ),
            CheckDef::new(
                "RNG:002",
                "range-is-distinct",
                "range spans multiple versions/commits",
                RangeIsDistinct,
            ),
            CheckDef::new(
                "PKG:001",
                "package-exists",
                "package exists in ecosystem's registry",
                PackageExists::new(Arc::clone(&resolvers)),
            ),
            CheckDef::new(
                "PKG:002",
                "package-versions-exist",
                "package versions exist in ecosystem's registry",
                PackageVersionsExist::new(resolvers),
            ),
            CheckDef::new(
                "PKG:003",
                "package-purl-valid",
                "package purl validates",
                PackagePurlValid,
            ),
            CheckDef::new(
                "SCH:001",
                "conforms-to-schema",
                "the record must conform to the OSV JSON schema",
                ConformsToSchema::new(schema)?,
            ),
        ];

        let checks: IndexMap<_, _> = definitions
            .into_iter()
            .map(|def| (def.code, Arc::new(def)))
            .collect();

        let collections = [
            Collection {
                name: ALL_COLLECTION,
                description: "all checks currently defined",
                checks: select(&checks, |_| true),
            },
            Collection {
                name: OFFLINE_COLLECTION,
                description: "all checks that do not require network access",
                checks: select(&checks, |code| !matches!(code, "PKG:001" | "PKG:002")),
            },
            Collection {
                name: OSV_DEV_COLLECTION,
                description: "the checks OSV.dev considers necessary for a high quality record",
                checks: select(&checks, |code| code != "PKG:002"),
            },
        ]
        .into_iter()
        .map(|collection| (collection.name, collection))
        .collect();

        Ok(Self {
            checks,
            collections,
        })
    }

    /// Builds the registry against the bundled OSV schema
    pub fn with_embedded_schema(resolvers: Arc<EcosystemResolvers>) -> Result<Self, SchemaError> {
        Self::new(resolvers, schema::EMBEDDED_SCHEMA)
    }

    pub fn from_code(&self, code: &str) -> Option<&Arc<CheckDef>> {
        self.checks.get(code)
    }

    pub fn from_name(&self, name: &str) -> Option<&Arc<CheckDef>> {
        self.checks.values().find(|def| def.name == name)
    }

    pub fn collection_from_name(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// Checks whose code starts with `prefix` (`"PKG"` or `"PKG:"`)
    pub fn checks_with_prefix(&self, prefix: &str) -> Vec<Arc<CheckDef>> {
        let prefix = prefix.trim_end_matches(':');
        self.checks
            .values()
            .filter(|def| {
                def.code
                    .split_once(':')
                    .is_some_and(|(group, _)| group == prefix)
            })
            .cloned()
            .collect()
    }

    /// Every check in registration order
    pub fn all(&self) -> impl Iterator<Item = &Arc<CheckDef>> {
        self.checks.values()
    }

    /// Every collection in registration order
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }
}

fn select(
    checks: &IndexMap<&'static str, Arc<CheckDef>>,
    keep: impl Fn(&str) -> bool,
) -> Vec<Arc<CheckDef>> {
    checks
        .values()
        .filter(|def| keep(def.code))
        .cloned()
        .collect()
}
