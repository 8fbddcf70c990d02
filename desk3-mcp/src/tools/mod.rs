// Tools module for the MCP server
//
// This module implements the tool registration and execution system
// for the MCP server.

pub mod market;
mod registry;

pub use registry::{ToolRegistry, Tool, ToolResult};
pub use market::MarketDataTool;

use std::sync::Arc;
use log::{debug, error};

use crate::catalog::Catalog;
use crate::errors::ToolError;
use crate::mcp::protocol::{CallToolParams, CallToolResult, ToolDescriptor};
use crate::upstream::UpstreamClient;

/// Initialize the tool registry with one tool per catalog operation
pub fn init_registry(
    catalog: &Catalog,
    client: Arc<UpstreamClient>,
) -> Result<Arc<ToolRegistry>, ToolError> {
    let mut registry = ToolRegistry::new();

    for (operation, spec) in catalog.tools() {
        registry.register_tool(Arc::new(MarketDataTool::new(operation, spec, client.clone())))?;
    }

    Ok(Arc::new(registry))
}

/// Execute a tool call.
///
/// Unknown tools and bad arguments are returned as errors. Upstream
/// failures become a result flagged `isError` so the client sees the cause.
pub async fn execute_tool(
    registry: &ToolRegistry,
    request: CallToolParams,
) -> Result<CallToolResult, ToolError> {
    let tool = registry.get_tool(&request.name)
        .ok_or_else(|| ToolError::NotFound(request.name.clone()))?;

    debug!("Executing tool {}", request.name);

    match tool.execute(request.arguments).await {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| value.to_string());
            Ok(CallToolResult::text(text))
        },
        Err(ToolError::Upstream(err)) => {
            error!("Tool {} failed: {}", request.name, err);
            Ok(CallToolResult::error(format!("Failed to execute {}: {}", request.name, err)))
        },
        Err(err) => Err(err),
    }
}

/// List all available tools
pub fn list_tools(registry: &ToolRegistry) -> Vec<ToolDescriptor> {
    registry.list_tools()
}
