//! Conformance of the raw record to the OSV JSON schema

use jsonschema::{Draft, Validator};
use serde_json::Value;
use thiserror::Error;

use crate::checks::Check;
use crate::config::RunConfig;
use crate::record::Record;

/// OSV schema bundled at build time
pub const EMBEDDED_SCHEMA: &[u8] = include_bytes!("../../schema/osv_schema.json");

/// The schema document itself is unusable; the linter cannot run
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("schema failed to compile: {0}")]
    Compile(String),
}

/// The raw record validates against the OSV JSON schema
pub struct ConformsToSchema {
    validator: Validator,
}

impl ConformsToSchema {
    pub fn new(schema: &[u8]) -> Result<Self, SchemaError> {
        let schema: Value = serde_json::from_slice(schema)?;
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&schema)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Every violation in `document` as `location: message`
    fn violations(&self, document: &Value, config: &RunConfig) -> Vec<String> {
        self.validator
            .iter_errors(document)
            .filter_map(|error| {
                let location = error.instance_path().to_string();
                // Ecosystems newer than the bundled schema fail its enum
                if config.new_ecosystem && location.ends_with("/ecosystem") {
                    return None;
                }
                let location = if location.is_empty() {
                    "(root)".to_string()
                } else {
                    location
                };
                Some(format!("{location}: {error}"))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl Check for ConformsToSchema {
    async fn run(&self, record: &Record, config: &RunConfig) -> Vec<String> {
        let violations = match serde_json::from_str::<Value>(record.raw()) {
            Ok(document) => self.violations(&document, config),
            Err(e) => vec![format!("(root): invalid JSON: {e}")],
        };

        if violations.is_empty() {
            return Vec::new();
        }

        let details: Vec<String> = violations.iter().map(|v| format!(" - {v}")).collect();
        vec![format!(
            "Record does not conform to schema:\n{}",
            details.join("\n")
        )]
    }
}
