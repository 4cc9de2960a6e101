//! Text and JSON rendering of lint results and listings
//!
//! Every payload implements both `Serialize` (for `--json`) and [`Render`]
//! (for the default text output), so callers never branch on the format.

use std::io::Write;

use serde::Serialize;

use crate::checks::{CheckDef, CheckRegistry};
use crate::ecosystem::Ecosystem;
use crate::linter::LintResults;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writes payloads in the selected format
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn render<T: Render + Serialize>(
        &self,
        payload: &T,
        w: &mut dyn Write,
    ) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Text => payload.render_text(w),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)
            }
        }
    }
}

/// Human-readable text rendering
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

/// Findings per file; serializes as `{}` when nothing was found
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct LintReport<'a>(pub &'a LintResults);

impl Render for LintReport<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        for (file, findings) in self.0 {
            writeln!(w, "{file}:")?;
            for finding in findings {
                writeln!(w, "\t * {finding}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<&CheckDef> for CheckSummary {
    fn from(def: &CheckDef) -> Self {
        Self {
            code: def.code,
            name: def.name,
            description: def.description,
        }
    }
}

impl CheckSummary {
    fn render_line(&self, w: &mut dyn Write, indent: &str) -> std::io::Result<()> {
        writeln!(
            w,
            "{indent}{}: ({}): {}",
            self.code, self.name, self.description
        )
    }
}

/// Every available check
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CheckListing(pub Vec<CheckSummary>);

impl From<&CheckRegistry> for CheckListing {
    fn from(registry: &CheckRegistry) -> Self {
        Self(registry.all().map(|def| CheckSummary::from(def.as_ref())).collect())
    }
}

impl Render for CheckListing {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Available checks:\n")?;
        for check in &self.0 {
            check.render_line(w, "")?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CollectionSummary {
    pub name: &'static str,
    pub description: &'static str,
    pub checks: Vec<CheckSummary>,
}

/// Every available collection with its checks
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CollectionListing(pub Vec<CollectionSummary>);

impl From<&CheckRegistry> for CollectionListing {
    fn from(registry: &CheckRegistry) -> Self {
        Self(
            registry
                .collections()
                .map(|collection| CollectionSummary {
                    name: collection.name,
                    description: collection.description,
                    checks: collection
                        .checks
                        .iter()
                        .map(|def| CheckSummary::from(def.as_ref()))
                        .collect(),
                })
                .collect(),
        )
    }
}

impl Render for CollectionListing {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Available check collections:\n")?;
        for collection in &self.0 {
            writeln!(w, "{}: {}", collection.name, collection.description)?;
            for check in &collection.checks {
                check.render_line(w, "\t")?;
            }
        }
        Ok(())
    }
}

/// Ecosystems package checks can verify
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct EcosystemListing(pub Vec<&'static str>);

impl From<&[Ecosystem]> for EcosystemListing {
    fn from(ecosystems: &[Ecosystem]) -> Self {
        Self(ecosystems.iter().map(Ecosystem::as_str).collect())
    }
}

impl Render for EcosystemListing {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Supported ecosystems:\n")?;
        for ecosystem in &self.0 {
            writeln!(w, "{ecosystem}")?;
        }
        Ok(())
    }
}
