//! Reads the tracked dependency's version out of `Cargo.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::MANIFEST_NAME;
use crate::error::{ExamplesError, Result};

use super::VersionSpec;

/// The only part of the manifest we care about.
#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    dependencies: Option<BTreeMap<String, RawDependency>>,
}

/// A dependency entry as written in the manifest.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDependency {
    /// `bevy = "0.14"`
    Simple(String),
    /// `bevy = { version = "0.14", features = [...] }` or `bevy = { path = "../bevy" }`
    Detailed(DetailedDependency),
    /// Anything else cargo would reject anyway
    Other(toml::Value),
}

#[derive(Debug, Deserialize)]
struct DetailedDependency {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    path: Option<String>,
}

/// A classified dependency entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyEntry {
    /// Registry version requirement, with `^`, `~` and quotes removed
    Version(String),
    /// Local path override, verbatim
    Path(String),
    /// Present but carries neither a version nor a path (e.g. `workspace = true`)
    Unspecified,
}

impl DependencyEntry {
    fn classify(raw: RawDependency) -> Self {
        match raw {
            RawDependency::Simple(version) => DependencyEntry::Version(strip_requirement(&version)),
            RawDependency::Detailed(DetailedDependency {
                path: Some(path), ..
            }) => DependencyEntry::Path(path),
            RawDependency::Detailed(DetailedDependency {
                version: Some(version),
                ..
            }) => DependencyEntry::Version(strip_requirement(&version)),
            RawDependency::Detailed(_) | RawDependency::Other(_) => DependencyEntry::Unspecified,
        }
    }

    pub fn into_version_spec(self) -> Option<VersionSpec> {
        match self {
            DependencyEntry::Version(v) | DependencyEntry::Path(v) => Some(VersionSpec::new(v)),
            DependencyEntry::Unspecified => None,
        }
    }
}

/// Removes requirement operators so `^0.14.0` can be matched against `bevy-0.14.0`.
pub fn strip_requirement(requirement: &str) -> String {
    requirement
        .chars()
        .filter(|c| !matches!(c, '^' | '~' | '"'))
        .collect()
}

/// Looks up `dependency` in the `[dependencies]` table of manifest `content`.
pub fn parse_dependency(content: &str, dependency: &str) -> Result<Option<DependencyEntry>> {
    let manifest: Manifest = toml::from_str(content)
        .map_err(|e| ExamplesError::Parse(format!("Invalid {}: {}", MANIFEST_NAME, e)))?;

    Ok(manifest
        .dependencies
        .and_then(|mut deps| deps.remove(dependency))
        .map(DependencyEntry::classify))
}

/// Reads `<project_root>/Cargo.toml` and returns the version specifier for `dependency`.
///
/// `Ok(None)` means the dependency is absent or declares no usable version.
/// A missing or malformed manifest is an error.
pub fn read_version_spec(project_root: &Path, dependency: &str) -> Result<Option<VersionSpec>> {
    let manifest_path = project_root.join(MANIFEST_NAME);
    let content = fs::read_to_string(&manifest_path).map_err(|e| {
        ExamplesError::Manifest(format!("cannot read {}: {}", manifest_path.display(), e))
    })?;

    let spec = parse_dependency(&content, dependency)?.and_then(DependencyEntry::into_version_spec);
    debug!(dependency, spec = ?spec, "Resolved version specifier");
    Ok(spec)
}
