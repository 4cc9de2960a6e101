//! Linter for OSV vulnerability records
//!
//! Records are checked for structural problems and, where the ecosystem has
//! a public registry, for packages and versions that do not exist.

pub mod checks;
pub mod config;
pub mod ecosystem;
pub mod http;
pub mod linter;
pub mod output;
pub mod record;
pub mod version;
