//! Module for resolving the tracked dependency.
//!
//! This module answers two questions for every request:
//! - Which version of the dependency does the project's manifest ask for?
//! - Where on disk does the source of that version live?

pub mod locator;
pub mod manifest;

use std::fmt;

/// A version requirement with operators stripped, or a local path override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec(String);

impl VersionSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local overrides are written relative to the project (`../bevy`, `./vendor/bevy`).
    pub fn is_local_path(&self) -> bool {
        self.0.starts_with('.')
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Re-export commonly used types
pub use locator::{Probe, SourceLocator};
pub use manifest::{read_version_spec, DependencyEntry};
