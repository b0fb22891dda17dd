//! MCP surface: exposes the example operations as tools over stdio.

pub mod server;

use tracing::info;

use crate::error::{ExamplesError, Result};

pub use server::McpServer;

/// Serves `server` on stdin/stdout until the client disconnects.
pub async fn serve_stdio(server: McpServer) -> Result<()> {
    use rmcp::ServiceExt;

    info!(
        name = %server.identity().name,
        version = %server.identity().version,
        "MCP server listening on stdio"
    );

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let running = server
        .serve(transport)
        .await
        .map_err(|e| ExamplesError::Mcp(e.to_string()))?;

    let reason = running
        .waiting()
        .await
        .map_err(|e| ExamplesError::Mcp(e.to_string()))?;
    info!(reason = ?reason, "MCP server stopped");

    Ok(())
}
