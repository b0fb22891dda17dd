mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bevy_examples_mcp=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = cli::load_config(cli.project_dir.as_ref())?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            cli::run_mcp_server(config).await?;
        }
        Commands::List { json } => {
            cli::list_examples(config, json)?;
        }
        Commands::Read { path } => {
            cli::read_example(config, &path)?;
        }
        Commands::Path { path } => {
            cli::example_path(config, &path)?;
        }
    }

    Ok(())
}
