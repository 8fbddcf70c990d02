// MCP dispatcher
//
// Decodes JSON-RPC messages, routes them to the tool or resource surface
// and encodes the outcome. Both transports hand raw messages to the same
// `Dispatcher`; it holds no per-connection state.

pub mod protocol;

use std::sync::Arc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use log::{debug, warn};

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::errors::{ServerError, ToolError};
use crate::resources::ResourceSurface;
use crate::tools::{self, ToolRegistry};
use crate::upstream::UpstreamClient;

use protocol::{
    CallToolParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ListResourcesResult, ListToolsResult, ReadResourceParams, ReadResourceResult,
    ResourcesCapability, ServerCapabilities, ServerInfo, ToolsCapability, PROTOCOL_VERSION,
};

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "desk3_service";

/// Routes MCP requests to the tool and resource surfaces
pub struct Dispatcher {
    tools: Arc<ToolRegistry>,
    resources: ResourceSurface,
}

impl Dispatcher {
    /// Build the dispatcher over a catalog and upstream client
    pub fn new(catalog: Arc<Catalog>, client: Arc<UpstreamClient>) -> Result<Self, ToolError> {
        let tools = tools::init_registry(&catalog, client.clone())?;
        let resources = ResourceSurface::new(catalog, client);
        Ok(Self { tools, resources })
    }

    /// Build everything the dispatcher needs from the startup settings
    pub fn from_settings(settings: &Settings) -> Result<Self, ServerError> {
        let catalog = Catalog::builtin()
            .map_err(|e| ServerError::Internal(format!("Invalid operation catalog: {}", e)))?;
        let client = UpstreamClient::new(settings)
            .map_err(|e| ServerError::Config(e.to_string()))?;
        Self::new(Arc::new(catalog), Arc::new(client))
            .map_err(|e| ServerError::Internal(e.to_string()))
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Handle one raw JSON-RPC message. Returns `None` for notifications.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse MCP message: {}", e);
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(e.to_string())));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request(e.to_string())));
            }
        };

        self.handle_request(request).await
    }

    /// Handle one decoded request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!("MCP notification {}", request.method);
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!("Unsupported jsonrpc version: {}", request.jsonrpc)),
            ));
        }

        debug!("MCP {}", request.method);
        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => {
                debug!("MCP {} failed: {}", request.method, error.message);
                JsonRpcResponse::error(id, error)
            }
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => to_value(self.initialize()),
            "ping" => Ok(json!({})),
            "resources/list" => to_value(ListResourcesResult {
                resources: self.resources.list_resources(),
            }),
            "resources/templates/list" => Ok(json!({ "resourceTemplates": [] })),
            "resources/read" => {
                let params: ReadResourceParams = parse_params(params)?;
                let contents = self
                    .resources
                    .read_resource(&params.uri)
                    .await
                    .map_err(|e| JsonRpcError::new(e.rpc_code(), e.to_string()))?;
                to_value(ReadResourceResult { contents: vec![contents] })
            },
            "tools/list" => to_value(ListToolsResult {
                tools: tools::list_tools(&self.tools),
            }),
            "tools/call" => {
                let params: CallToolParams = parse_params(params)?;
                let result = tools::execute_tool(&self.tools, params)
                    .await
                    .map_err(|e| JsonRpcError::new(e.rpc_code(), e.to_string()))?;
                to_value(result)
            },
            _ => Err(JsonRpcError::method_not_found(method)),
        }
    }

    fn initialize(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                resources: ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                },
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: crate::VERSION.to_string(),
            },
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn to_value<T: serde::Serialize>(result: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
