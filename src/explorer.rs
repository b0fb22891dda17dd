//! The example operations, independent of any transport.
//!
//! Each call re-reads the manifest and re-scans the filesystem; the explorer
//! holds configuration only.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ExamplesConfig, EXAMPLES_DIR, MANIFEST_NAME};
use crate::dependencies::{read_version_spec, SourceLocator, VersionSpec};
use crate::error::{ExamplesError, Result};
use crate::reader::read_truncated;
use crate::tree::{format_tree, ExampleNode, PathMode, TreeBuilder};

/// Version reported when the manifest does not pin the dependency.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Result of `list-examples`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleListing {
    pub version: String,
    #[serde(skip)]
    pub dependency: String,
    #[serde(skip)]
    pub examples_dir: Option<PathBuf>,
    pub tree: Vec<ExampleNode>,
}

impl ExampleListing {
    fn unresolved(dependency: &str, spec: Option<&VersionSpec>) -> Self {
        Self {
            version: spec.map_or_else(|| UNKNOWN_VERSION.to_string(), |s| s.to_string()),
            dependency: dependency.to_string(),
            examples_dir: None,
            tree: Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.examples_dir.is_some()
    }

    /// `{"version": ..., "tree": [...]}`
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ExamplesError::Parse(e.to_string()))
    }

    /// Human-readable listing with a short header.
    pub fn to_text(&self) -> String {
        let mut output = format!("{} version: {}\n", self.dependency, self.version);

        match &self.examples_dir {
            None => {
                output.push_str(&format!(
                    "No {} source directory found, so there are no examples to list.",
                    self.dependency
                ));
            }
            Some(dir) => {
                let files: usize = self.tree.iter().map(ExampleNode::file_count).sum();
                output.push_str(&format!("Examples: {} ({} files)\n\n", dir.display(), files));
                output.push_str(&format_tree(&self.tree));
            }
        }

        output
    }
}

/// Result of `read-example`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleRead {
    /// The dependency source could not be located
    Unresolved(String),
    /// Fenced file content, or the read error as text
    Content(String),
}

impl ExampleRead {
    pub fn text(&self) -> &str {
        match self {
            ExampleRead::Unresolved(text) | ExampleRead::Content(text) => text,
        }
    }
}

pub struct ExampleExplorer {
    config: ExamplesConfig,
    locator: SourceLocator,
}

impl ExampleExplorer {
    pub fn new(config: ExamplesConfig) -> Self {
        let locator = SourceLocator::from_config(&config);
        Self { config, locator }
    }

    pub fn config(&self) -> &ExamplesConfig {
        &self.config
    }

    fn resolve(&self) -> Result<(Option<VersionSpec>, Option<PathBuf>)> {
        let spec = read_version_spec(&self.config.project_root, &self.config.dependency)?;
        let source = self.locator.locate(spec.as_ref());
        Ok((spec, source))
    }

    /// The dependency's `examples` directory, if its source can be located.
    pub fn examples_dir(&self) -> Result<Option<PathBuf>> {
        let (_, source) = self.resolve()?;
        Ok(source.map(|dir| dir.join(EXAMPLES_DIR)))
    }

    /// Lists the examples of the version declared in the manifest.
    ///
    /// An unknown version or a missing source directory gives an empty
    /// listing; a source directory without a listable `examples` directory
    /// is an error.
    pub fn list_examples(&self) -> Result<ExampleListing> {
        let (spec, source) = self.resolve()?;

        let Some(source) = source else {
            info!(
                dependency = %self.config.dependency,
                version = ?spec,
                "No source directory for dependency"
            );
            return Ok(ExampleListing::unresolved(&self.config.dependency, spec.as_ref()));
        };

        let examples_dir = source.join(EXAMPLES_DIR);
        let tree = TreeBuilder::new(&self.config.extension)
            .with_mode(PathMode::Relative)
            .build(&examples_dir)?;

        Ok(ExampleListing {
            version: spec.map_or_else(|| UNKNOWN_VERSION.to_string(), |s| s.to_string()),
            dependency: self.config.dependency.clone(),
            examples_dir: Some(examples_dir),
            tree,
        })
    }

    /// Absolute path of `path` inside the examples directory.
    pub fn example_path(&self, path: &str) -> Result<Option<PathBuf>> {
        if path.trim().is_empty() {
            return Err(ExamplesError::InvalidPath("path must not be empty".to_string()));
        }

        let resolved = self.examples_dir()?.map(|dir| dir.join(path));
        debug!(path, resolved = ?resolved, "Resolved example path");
        Ok(resolved)
    }

    /// Reads an example as a fenced code block, truncated to the configured line count.
    pub fn read_example(&self, path: &str) -> Result<ExampleRead> {
        let Some(file) = self.example_path(path)? else {
            return Ok(ExampleRead::Unresolved(self.unresolved_message()));
        };

        let content = read_truncated(&file, self.config.max_lines);
        Ok(ExampleRead::Content(format!(
            "```{}\n{}\n```",
            self.config.language, content
        )))
    }

    /// Text returned when the dependency source cannot be located.
    pub fn unresolved_message(&self) -> String {
        format!(
            "Error: could not locate the {dep} source directory. Check that {manifest} in {root} \
             declares {dep} and that the crate has been downloaded (e.g. with `cargo fetch`).",
            dep = self.config.dependency,
            manifest = MANIFEST_NAME,
            root = self.config.project_root.display(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn explorer_with_local_bevy() -> (ExampleExplorer, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("game");
        fs::create_dir_all(&project).unwrap();
        fs::write(
            project.join("Cargo.toml"),
            "[dependencies]\nbevy = { path = \"../bevy\" }\n",
        )
        .unwrap();
        fs::create_dir_all(temp_dir.path().join("bevy/examples/2d")).unwrap();
        fs::write(temp_dir.path().join("bevy/examples/2d/sprite.rs"), "fn main() {}\n").unwrap();

        let config = ExamplesConfig::new(&project).with_registry_src(temp_dir.path().join("registry"));
        (ExampleExplorer::new(config), temp_dir)
    }

    #[test]
    fn test_listing_uses_local_path_as_version() {
        let (explorer, _guard) = explorer_with_local_bevy();
        let listing = explorer.list_examples().unwrap();

        assert_eq!(listing.version, "../bevy");
        assert!(listing.is_resolved());
        assert_eq!(listing.tree.len(), 1);
        assert_eq!(listing.tree[0].children()[0].path, "2d/sprite.rs");
    }

    #[test]
    fn test_listing_text() {
        let (explorer, _guard) = explorer_with_local_bevy();
        let text = explorer.list_examples().unwrap().to_text();

        assert!(text.starts_with("bevy version: ../bevy\n"));
        assert!(text.contains("(1 files)"));
        assert!(text.ends_with("+ 2d\n  - sprite.rs"));
    }

    #[test]
    fn test_listing_json_shape() {
        let (explorer, _guard) = explorer_with_local_bevy();
        let json: serde_json::Value =
            serde_json::from_str(&explorer.list_examples().unwrap().to_json().unwrap()).unwrap();

        assert_eq!(json["version"], "../bevy");
        assert_eq!(json["tree"][0]["name"], "2d");
        assert_eq!(json["tree"][0]["children"][0]["isFile"], true);
        assert!(json.get("examples_dir").is_none());
    }

    #[test]
    fn test_read_example_is_fenced() {
        let (explorer, _guard) = explorer_with_local_bevy();
        let read = explorer.read_example("2d/sprite.rs").unwrap();
        assert_eq!(read, ExampleRead::Content("```rust\nfn main() {}\n\n```".to_string()));
    }

    #[test]
    fn test_example_path_rejects_empty() {
        let (explorer, _guard) = explorer_with_local_bevy();
        assert!(matches!(
            explorer.example_path("  "),
            Err(ExamplesError::InvalidPath(_))
        ));
    }
}
