//! Runs selected checks over record files
//!
//! Files are linted independently, up to a configurable number at a time.
//! Checks within one file run in order, one after another.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::checks::{CheckDef, CheckRegistry, Finding};
use crate::config::RunConfig;
use crate::record::Record;

/// Name under which standard input is linted and reported
pub const STDIN: &str = "<stdin>";

/// Marker that lists instead of selecting
pub const LIST: &str = "list";

#[derive(Debug, Error)]
pub enum LintError {
    #[error("{0:?} is not a valid check (use \"list\" to see all available checks)")]
    UnknownCheck(String),

    #[error("{0:?} is not a valid check collection (use \"list\" to see all available collections)")]
    UnknownCollection(String),

    #[error("no files to check (use - for stdin)")]
    NoFiles,
}

/// Findings per linted file; files without findings are absent
pub type LintResults = BTreeMap<String, Vec<Finding>>;

/// Per-run driver settings
#[derive(Debug, Clone)]
pub struct LintOptions {
    pub config: RunConfig,
    /// Files linted at the same time
    pub parallel: usize,
    /// Log each check as it starts
    pub narrate: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            config: RunConfig::default(),
            parallel: 1,
            narrate: false,
        }
    }
}

/// Resolves the checks to run
///
/// Explicit `codes` win over `collection`. Each entry may be a check code,
/// a check name or a code prefix such as `PKG`.
pub fn select_checks(
    registry: &CheckRegistry,
    codes: &[String],
    collection: &str,
) -> Result<Vec<Arc<CheckDef>>, LintError> {
    if codes.is_empty() {
        return registry
            .collection_from_name(collection)
            .map(|collection| collection.checks.clone())
            .ok_or_else(|| LintError::UnknownCollection(collection.to_string()));
    }

    let mut selected: Vec<Arc<CheckDef>> = Vec::new();
    for code in codes {
        let matched = match registry
            .from_code(code)
            .or_else(|| registry.from_name(code))
        {
            Some(def) => vec![Arc::clone(def)],
            None => registry.checks_with_prefix(code),
        };
        if matched.is_empty() {
            return Err(LintError::UnknownCheck(code.clone()));
        }
        for def in matched {
            if !selected.iter().any(|s| s.code == def.code) {
                selected.push(def);
            }
        }
    }
    Ok(selected)
}

/// Expands `paths` into the files to lint
///
/// `-` stands for standard input, directories are searched recursively for
/// `*.json` files, and paths that cannot be read are logged and skipped.
/// No paths at all means standard input.
pub fn collect_files(paths: &[String]) -> Vec<String> {
    if paths.is_empty() {
        return vec![STDIN.to_string()];
    }

    let mut files = Vec::new();
    for path in paths {
        if path == "-" {
            files.push(STDIN.to_string());
            continue;
        }

        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("{}: {}, skipping", path, e);
                continue;
            }
        };

        if !metadata.is_dir() {
            files.push(path.clone());
            continue;
        }

        let before = files.len();
        for entry in WalkDir::new(path).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_json(entry.path()) => {
                    files.push(entry.path().display().to_string());
                }
                Ok(_) => {}
                Err(e) => warn!("{}, skipping", e),
            }
        }
        debug!("Found {} files in {:?}", files.len() - before, path);
    }
    files
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Runs `checks` in order over one document
///
/// A document that is not JSON is logged and checked as an empty record, so
/// the schema check still reports it.
pub async fn lint(
    filename: &str,
    content: &[u8],
    checks: &[Arc<CheckDef>],
    options: &LintOptions,
) -> Vec<Finding> {
    let (record, error) = Record::parse_lossy(content);
    if let Some(e) = error {
        warn!("{:?}: {}", filename, e);
    }

    let mut findings = Vec::new();
    for check in checks {
        if options.narrate {
            info!("Running {:?} check on {:?}", check.name, filename);
        }
        let check_findings = check.run(&record, &options.config).await;
        if !check_findings.is_empty() {
            debug!("{:?}: {:?}: {:?}", filename, check.name, check_findings);
        }
        findings.extend(check_findings);
    }
    findings
}

/// Lints every file, at most `options.parallel` at a time
///
/// Unreadable files are logged and left out of the results.
pub async fn lint_files(
    files: &[String],
    checks: &[Arc<CheckDef>],
    options: &LintOptions,
) -> LintResults {
    let mut completed = stream::iter(files)
        .map(|file| async move {
            let findings = match read_input(file).await {
                Ok(content) => Some(lint(file, &content, checks, options).await),
                Err(e) => {
                    warn!("{}: {}, skipping", file, e);
                    None
                }
            };
            (file, findings)
        })
        .buffer_unordered(options.parallel.max(1));

    let mut results = LintResults::new();
    while let Some((file, findings)) = completed.next().await {
        if let Some(findings) = findings.filter(|f| !f.is_empty()) {
            results.insert(file.clone(), findings);
        }
    }
    results
}

async fn read_input(file: &str) -> std::io::Result<Vec<u8>> {
    if file == STDIN {
        let mut content = Vec::new();
        tokio::io::stdin().read_to_end(&mut content).await?;
        Ok(content)
    } else {
        tokio::fs::read(file).await
    }
}
