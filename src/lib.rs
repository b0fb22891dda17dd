pub mod config;
pub mod dependencies;
pub mod error;
pub mod explorer;
pub mod mcp;
pub mod reader;
pub mod tree;

pub use config::{ExamplesConfig, ServerIdentity};
pub use dependencies::{DependencyEntry, Probe, SourceLocator, VersionSpec};
pub use error::{ExamplesError, Result};
pub use explorer::{ExampleExplorer, ExampleListing, ExampleRead};
pub use mcp::McpServer;
pub use reader::read_truncated;
pub use tree::{format_tree, ExampleNode, PathMode, TreeBuilder};
