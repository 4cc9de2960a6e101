//! Shared setup for end-to-end lint tests

pub mod registry;

pub use registry::*;
