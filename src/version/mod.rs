//! Version management layer for package and version existence checks
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Resolver   │────▶│  Registry   │────▶│ HttpClient  │
//! │ (ecosystem) │     │  (fetch)    │     │  (retries)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   Matcher   │
//! │(version eq) │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`resolver`]: Ecosystem to matcher/registry routing
//! - [`matcher`]: Version matching trait and the missing-version search
//! - [`matchers`]: Ecosystem-specific version grammars
//! - [`registry`]: Registry trait for probing packages and listing versions
//! - [`registries`]: Concrete registry implementations (npm, PyPI, Go proxy, etc.)
//! - [`error`]: Error types for registry and version checks
//! - [`types`]: Common types like `PackageVersions`

pub mod error;
pub mod matcher;
pub mod matchers;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod types;
