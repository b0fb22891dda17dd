use std::sync::Arc;

use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool, ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::{ServerIdentity, SERVER_INSTRUCTIONS};
use crate::explorer::{ExampleExplorer, ExampleRead};

pub const LIST_EXAMPLES: &str = "list-examples";
pub const READ_EXAMPLE: &str = "read-example";
pub const GET_EXAMPLE_PATH: &str = "get-example-path";

#[derive(Clone)]
pub struct McpServer {
    explorer: Arc<ExampleExplorer>,
    identity: Arc<ServerIdentity>,
}

impl McpServer {
    pub fn new(explorer: ExampleExplorer, identity: ServerIdentity) -> Self {
        Self {
            explorer: Arc::new(explorer),
            identity: Arc::new(identity),
        }
    }

    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    /// Tools advertised to the host.
    pub fn tools(&self) -> Vec<Tool> {
        let dep = &self.explorer.config().dependency;
        vec![
            tool(
                LIST_EXAMPLES,
                "List Examples",
                format!(
                    "List the {dep} example files for the {dep} version in Cargo.toml, as an \
                     indented tree followed by the same tree as JSON"
                ),
                schema_for::<EmptyParams>(),
            ),
            tool(
                READ_EXAMPLE,
                "Read Example",
                format!(
                    "Read a {dep} example file (first {} lines). `path` is relative to the \
                     examples directory, as shown by list-examples",
                    self.explorer.config().max_lines
                ),
                schema_for::<ExamplePathParams>(),
            ),
            tool(
                GET_EXAMPLE_PATH,
                "Get Example Path",
                format!("Get the absolute path of a {dep} example file without reading it"),
                schema_for::<ExamplePathParams>(),
            ),
        ]
    }

    /// Runs a tool by name.
    ///
    /// Unknown tools and bad arguments are protocol errors; everything else
    /// comes back as a tool result, with `is_error` set for failures.
    pub fn handle_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = name, "Tool call");

        let result = match name {
            LIST_EXAMPLES => self.list_examples(),
            READ_EXAMPLE => {
                let params = parse_path_params(arguments)?;
                match self.explorer.read_example(&params.path) {
                    Ok(ExampleRead::Content(text)) => CallToolResult::success(vec![Content::text(text)]),
                    Ok(ExampleRead::Unresolved(text)) => CallToolResult::error(vec![Content::text(text)]),
                    Err(e) => failure("read example", e),
                }
            }
            GET_EXAMPLE_PATH => {
                let params = parse_path_params(arguments)?;
                match self.explorer.example_path(&params.path) {
                    Ok(Some(path)) => {
                        CallToolResult::success(vec![Content::text(path.to_string_lossy().into_owned())])
                    }
                    Ok(None) => CallToolResult::error(vec![Content::text(
                        self.explorer.unresolved_message(),
                    )]),
                    Err(e) => failure("resolve example path", e),
                }
            }
            _ => {
                return Err(McpError::invalid_params(
                    format!("Unknown tool: {}", name),
                    None,
                ))
            }
        };

        Ok(result)
    }

    fn list_examples(&self) -> CallToolResult {
        let listing = match self.explorer.list_examples() {
            Ok(listing) => listing,
            Err(e) => return failure("list examples", e),
        };

        match listing.to_json() {
            Ok(json) => CallToolResult::success(vec![
                Content::text(listing.to_text()),
                Content::text(json),
            ]),
            Err(e) => failure("list examples", e),
        }
    }
}

fn failure(action: &str, e: crate::error::ExamplesError) -> CallToolResult {
    error!(error = %e, "Failed to {}", action);
    CallToolResult::error(vec![Content::text(format!("Failed to {}: {}", action, e))])
}

fn tool(
    name: &'static str,
    title: &str,
    description: String,
    input_schema: Arc<JsonObject>,
) -> Tool {
    Tool {
        name: name.into(),
        title: Some(title.to_string()),
        description: Some(description.into()),
        input_schema,
        output_schema: None,
        annotations: None,
        icons: None,
        meta: None,
    }
}

fn schema_for<T: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(&schema) {
        Ok(serde_json::Value::Object(map)) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

fn parse_path_params(arguments: Option<JsonObject>) -> Result<ExamplePathParams, McpError> {
    let params: ExamplePathParams =
        serde_json::from_value(serde_json::Value::Object(arguments.unwrap_or_default()))
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

    if params.path.trim().is_empty() {
        return Err(McpError::invalid_params("path must not be empty", None));
    }

    Ok(params)
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct EmptyParams {}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExamplePathParams {
    /// Example path relative to the examples directory, e.g. `2d/sprite.rs`
    #[schemars(length(min = 1))]
    pub path: String,
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: self.identity.name.clone(),
                title: Some(self.identity.description.clone()),
                version: self.identity.version.clone(),
                icons: None,
                website_url: None,
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.handle_tool(request.name.as_ref(), request.arguments)
    }
}
