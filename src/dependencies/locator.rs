//! Maps a version specifier to the dependency's source directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::ExamplesConfig;

use super::VersionSpec;

/// Outcome of checking one registry for `<name>-<version>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Found(PathBuf),
    Missing,
}

/// Locates the source tree of the tracked dependency.
///
/// Nothing is cached: every call looks at the filesystem again.
#[derive(Debug, Clone)]
pub struct SourceLocator {
    project_root: PathBuf,
    registry_src: Option<PathBuf>,
    dependency: String,
}

impl SourceLocator {
    pub fn new(
        project_root: impl Into<PathBuf>,
        registry_src: Option<PathBuf>,
        dependency: impl Into<String>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            registry_src,
            dependency: dependency.into(),
        }
    }

    pub fn from_config(config: &ExamplesConfig) -> Self {
        Self::new(
            config.project_root.clone(),
            config.registry_src.clone(),
            config.dependency.clone(),
        )
    }

    /// Returns the source directory for `spec`, or `None` when it cannot be found.
    ///
    /// Local paths are joined onto the project root and returned without
    /// checking that they exist.
    pub fn locate(&self, spec: Option<&VersionSpec>) -> Option<PathBuf> {
        let spec = spec?;

        if spec.is_local_path() {
            return Some(self.project_root.join(spec.as_str()));
        }

        let registry_src = self.registry_src.as_ref()?;

        // The registry has subdirectories like "index.crates.io-{hash}"
        // We need to search in all of them
        let entries = match fs::read_dir(registry_src) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(
                    path = %registry_src.display(),
                    error = %e,
                    "Cargo registry not readable"
                );
                return None;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable registry entry");
                    continue;
                }
            };
            if let Probe::Found(dir) = self.probe(&entry.path(), spec.as_str()) {
                debug!(path = %dir.display(), "Found dependency source");
                return Some(dir);
            }
        }

        debug!(dependency = %self.dependency, version = %spec, "Dependency source not found");
        None
    }

    /// Checks a single registry directory for `<dependency>-<version>`.
    ///
    /// Any filesystem error counts as a miss.
    pub fn probe(&self, registry_dir: &Path, version: &str) -> Probe {
        let crate_dir = registry_dir.join(format!("{}-{}", self.dependency, version));
        match fs::metadata(&crate_dir) {
            Ok(meta) if meta.is_dir() => Probe::Found(crate_dir),
            Ok(_) => Probe::Missing,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %crate_dir.display(), error = %e, "Skipping registry candidate");
                }
                Probe::Missing
            }
        }
    }
}
