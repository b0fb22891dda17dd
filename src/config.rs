//! Runtime configuration.
//!
//! Nothing here is mutated after startup: the binary builds one
//! [`ExamplesConfig`] and one [`ServerIdentity`] and hands them to the server.

use std::path::PathBuf;

use crate::error::Result;

/// Crate whose examples are served.
pub const TRACKED_DEPENDENCY: &str = "bevy";
/// Extension of the files listed in the example tree.
pub const SOURCE_EXTENSION: &str = "rs";
/// Language tag used for fenced code blocks.
pub const SOURCE_LANGUAGE: &str = "rust";
pub const MANIFEST_NAME: &str = "Cargo.toml";
pub const EXAMPLES_DIR: &str = "examples";
pub const DEFAULT_MAX_LINES: usize = 200;

/// Usage policy advertised to the host through the MCP `instructions` field.
pub const SERVER_INSTRUCTIONS: &str = "Serves the Bevy examples that match the Bevy version declared \
in the project's Cargo.toml. Call list-examples first to see what exists, then get-example-path \
or read-example with a path taken from that listing. Prefer these examples over memory when \
writing Bevy code, since the API changes between releases.";

/// Where to look for the manifest and the cargo registry, and what to serve.
#[derive(Debug, Clone)]
pub struct ExamplesConfig {
    /// Directory holding the project's `Cargo.toml`
    pub project_root: PathBuf,
    /// Cargo registry source cache (`~/.cargo/registry/src`)
    pub registry_src: Option<PathBuf>,
    pub dependency: String,
    pub extension: String,
    pub language: String,
    pub max_lines: usize,
}

impl ExamplesConfig {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            registry_src: find_cargo_registry(),
            dependency: TRACKED_DEPENDENCY.to_string(),
            extension: SOURCE_EXTENSION.to_string(),
            language: SOURCE_LANGUAGE.to_string(),
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    /// Uses the process working directory as the project root.
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd))
    }

    pub fn with_registry_src(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_src = Some(path.into());
        self
    }

    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependency = name.into();
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(MANIFEST_NAME)
    }
}

/// Finds the cargo registry source directory.
fn find_cargo_registry() -> Option<PathBuf> {
    // Check CARGO_HOME environment variable first
    if let Some(cargo_home) = std::env::var_os("CARGO_HOME") {
        let registry_src = PathBuf::from(cargo_home).join("registry").join("src");
        if registry_src.is_dir() {
            return Some(registry_src);
        }
    }

    dirs_home().map(|home| home.join(".cargo").join("registry").join("src"))
}

/// Gets the home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Process identity reported to the MCP host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl ServerIdentity {
    /// Identity compiled in from the package descriptor.
    pub fn from_package() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ExamplesConfig::new("/project");
        assert_eq!(config.dependency, "bevy");
        assert_eq!(config.extension, "rs");
        assert_eq!(config.language, "rust");
        assert_eq!(config.max_lines, 200);
        assert_eq!(config.manifest_path(), PathBuf::from("/project/Cargo.toml"));
    }

    #[test]
    fn test_config_overrides() {
        let config = ExamplesConfig::new("/project")
            .with_registry_src("/cache/registry/src")
            .with_dependency("wgpu")
            .with_max_lines(10);

        assert_eq!(config.registry_src, Some(PathBuf::from("/cache/registry/src")));
        assert_eq!(config.dependency, "wgpu");
        assert_eq!(config.max_lines, 10);
    }

    #[test]
    fn test_identity_from_package() {
        let identity = ServerIdentity::from_package();
        assert_eq!(identity.name, "bevy-examples-mcp");
        assert!(!identity.version.is_empty());
        assert!(!identity.description.is_empty());
    }
}
