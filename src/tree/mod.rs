//! Example tree: scanning the examples directory and rendering it.

pub mod builder;
pub mod formatter;

use serde::{Deserialize, Serialize};

/// One file or directory under the examples directory.
///
/// Files never carry `children`; directories always do, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleNode {
    pub name: String,
    pub path: String,
    pub is_file: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ExampleNode>>,
}

impl ExampleNode {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_file: true,
            children: None,
        }
    }

    pub fn directory(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<ExampleNode>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_file: false,
            children: Some(children),
        }
    }

    /// Children of a directory; empty for files.
    pub fn children(&self) -> &[ExampleNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Number of file leaves in this subtree.
    pub fn file_count(&self) -> usize {
        if self.is_file {
            1
        } else {
            self.children().iter().map(ExampleNode::file_count).sum()
        }
    }
}

/// How `ExampleNode::path` is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Full filesystem path
    Absolute,
    /// Path below the scan root, e.g. `3d/lighting.rs`
    #[default]
    Relative,
}

pub use builder::TreeBuilder;
pub use formatter::format_tree;
