use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ExamplesError, Result};

use super::{ExampleNode, PathMode};

/// Recursively scans a directory into [`ExampleNode`]s.
///
/// Only directories and files ending in `.<extension>` are kept. Entries keep
/// the order `read_dir` returns them in.
///
/// Directory detection follows symlinks and there is no depth limit, so a
/// symlink cycle under the root makes the scan recurse until the path gets
/// too long for the OS.
pub struct TreeBuilder {
    suffix: String,
    mode: PathMode,
}

impl TreeBuilder {
    pub fn new(extension: &str) -> Self {
        Self {
            suffix: format!(".{}", extension.trim_start_matches('.')),
            mode: PathMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: PathMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builds the tree below `root`. Fails if `root` or any directory under it
    /// cannot be listed.
    pub fn build(&self, root: &Path) -> Result<Vec<ExampleNode>> {
        let nodes = self.scan(root, root)?;
        debug!(root = %root.display(), entries = nodes.len(), "Scanned example tree");
        Ok(nodes)
    }

    fn scan(&self, dir: &Path, root: &Path) -> Result<Vec<ExampleNode>> {
        let scan_error = |source| ExamplesError::Scan {
            path: dir.display().to_string(),
            source,
        };

        let mut nodes = Vec::new();
        for entry in fs::read_dir(dir).map_err(scan_error)? {
            let entry = entry.map_err(scan_error)?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            if path.is_dir() {
                let children = self.scan(&path, root)?;
                nodes.push(ExampleNode::directory(name, self.report(&path, root), children));
            } else if name.ends_with(&self.suffix) {
                nodes.push(ExampleNode::file(name, self.report(&path, root)));
            }
        }

        Ok(nodes)
    }

    fn report(&self, path: &Path, root: &Path) -> String {
        match self.mode {
            PathMode::Absolute => path.to_string_lossy().into_owned(),
            PathMode::Relative => path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn find<'a>(nodes: &'a [ExampleNode], name: &str) -> Option<&'a ExampleNode> {
        nodes.iter().find(|n| n.name == name)
    }

    fn sample_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.rs", "fn main() {}");
        create_file(temp_dir.path(), "b.txt", "notes");
        create_file(temp_dir.path(), "sub/c.rs", "fn main() {}");
        temp_dir
    }

    #[test]
    fn test_build_filters_by_extension() {
        let temp_dir = sample_tree();
        let nodes = TreeBuilder::new("rs").build(temp_dir.path()).unwrap();

        assert_eq!(nodes.len(), 2);
        assert!(find(&nodes, "b.txt").is_none());

        let a = find(&nodes, "a.rs").unwrap();
        assert!(a.is_file);
        assert!(a.children.is_none());

        let sub = find(&nodes, "sub").unwrap();
        assert!(!sub.is_file);
        assert_eq!(sub.children().len(), 1);
        assert_eq!(sub.children()[0].name, "c.rs");
    }

    #[test]
    fn test_relative_paths() {
        let temp_dir = sample_tree();
        let nodes = TreeBuilder::new("rs")
            .with_mode(PathMode::Relative)
            .build(temp_dir.path())
            .unwrap();

        let sub = find(&nodes, "sub").unwrap();
        assert_eq!(sub.path, "sub");
        assert_eq!(sub.children()[0].path, "sub/c.rs");
        assert_eq!(find(&nodes, "a.rs").unwrap().path, "a.rs");
    }

    #[test]
    fn test_absolute_paths() {
        let temp_dir = sample_tree();
        let nodes = TreeBuilder::new("rs")
            .with_mode(PathMode::Absolute)
            .build(temp_dir.path())
            .unwrap();

        let sub = find(&nodes, "sub").unwrap();
        let expected = temp_dir.path().join("sub").join("c.rs");
        assert_eq!(sub.children()[0].path, expected.to_string_lossy());
    }

    #[test]
    fn test_directory_with_only_other_files_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "assets/readme.md", "# assets");

        let nodes = TreeBuilder::new("rs").build(temp_dir.path()).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "assets");
        assert_eq!(nodes[0].children, Some(Vec::new()));
    }

    #[test]
    fn test_extension_with_leading_dot() {
        let temp_dir = sample_tree();
        let nodes = TreeBuilder::new(".rs").build(temp_dir.path()).unwrap();
        assert!(find(&nodes, "a.rs").is_some());
    }

    #[test]
    fn test_deeply_nested() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "ui/widgets/buttons/button.rs", "");

        let nodes = TreeBuilder::new("rs").build(temp_dir.path()).unwrap();
        let buttons = &nodes[0].children()[0].children()[0];
        assert_eq!(buttons.name, "buttons");
        assert_eq!(buttons.children()[0].path, "ui/widgets/buttons/button.rs");
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = TreeBuilder::new("rs").build(&temp_dir.path().join("examples"));
        assert!(matches!(result, Err(ExamplesError::Scan { .. })));
    }

    #[test]
    fn test_root_is_a_file_is_an_error() {
        let temp_dir = sample_tree();
        let result = TreeBuilder::new("rs").build(&temp_dir.path().join("a.rs"));
        assert!(result.is_err());
    }
}
