use std::path::PathBuf;

use clap::{Parser, Subcommand};

use bevy_examples_mcp::error::Result;
use bevy_examples_mcp::explorer::ExampleExplorer;
use bevy_examples_mcp::mcp::{self, McpServer};
use bevy_examples_mcp::{ExampleRead, ExamplesConfig, ServerIdentity};

#[derive(Parser)]
#[command(name = "bevy-examples-mcp")]
#[command(about = "MCP server for the Bevy examples matching your Cargo.toml")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Start MCP server (default)
    bevy-examples-mcp

    # Print the example tree for the project in ./game
    bevy-examples-mcp --project-dir ./game list

    # Print an example
    bevy-examples-mcp read 3d/lighting.rs
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory containing the project's Cargo.toml (defaults to the working directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start MCP server on stdio
    Serve,

    /// Print the example tree
    List {
        /// Print JSON instead of the indented tree
        #[arg(long)]
        json: bool,
    },

    /// Print an example file
    Read {
        /// Path relative to the examples directory
        path: String,
    },

    /// Print the absolute path of an example file
    Path {
        /// Path relative to the examples directory
        path: String,
    },
}

pub fn load_config(project_dir: Option<&PathBuf>) -> Result<ExamplesConfig> {
    match project_dir {
        Some(dir) => Ok(ExamplesConfig::new(dir)),
        None => ExamplesConfig::from_env(),
    }
}

pub async fn run_mcp_server(config: ExamplesConfig) -> Result<()> {
    let server = McpServer::new(ExampleExplorer::new(config), ServerIdentity::from_package());
    mcp::serve_stdio(server).await
}

pub fn list_examples(config: ExamplesConfig, json: bool) -> Result<()> {
    let listing = ExampleExplorer::new(config).list_examples()?;

    if json {
        println!("{}", listing.to_json()?);
    } else {
        println!("{}", listing.to_text());
    }

    Ok(())
}

pub fn read_example(config: ExamplesConfig, path: &str) -> Result<()> {
    match ExampleExplorer::new(config).read_example(path)? {
        ExampleRead::Content(text) => println!("{}", text),
        ExampleRead::Unresolved(text) => eprintln!("{}", text),
    }

    Ok(())
}

pub fn example_path(config: ExamplesConfig, path: &str) -> Result<()> {
    let explorer = ExampleExplorer::new(config);
    match explorer.example_path(path)? {
        Some(path) => println!("{}", path.display()),
        None => eprintln!("{}", explorer.unresolved_message()),
    }

    Ok(())
}
