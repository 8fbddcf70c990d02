// Tool registry module
//
// This module defines the tool registry system which manages tool registration
// and discovery for the MCP server.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ToolError;
use crate::mcp::protocol::ToolDescriptor;

/// Type alias for tool execution results
pub type ToolResult = Result<Value, ToolError>;

/// Tool trait for implementing tool functionality
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool descriptor
    fn definition(&self) -> ToolDescriptor;

    /// Execute the tool with the given arguments
    async fn execute(&self, params: Value) -> ToolResult;

    /// Validate the arguments against the `required` list of the input schema
    fn validate_params(&self, params: &Value) -> Result<(), ToolError> {
        let definition = self.definition();
        let required = definition
            .input_schema
            .get("required")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let map = match params {
            Value::Object(map) => map.clone(),
            Value::Null => serde_json::Map::new(),
            _ => {
                return Err(ToolError::InvalidParameters(
                    "Parameters must be an object".to_string()
                ));
            }
        };

        for name in required.iter().filter_map(Value::as_str) {
            match map.get(name) {
                None | Some(Value::Null) => {
                    return Err(ToolError::InvalidParameters(
                        format!("Missing required argument: {}", name)
                    ));
                },
                Some(Value::String(s)) if s.is_empty() => {
                    return Err(ToolError::InvalidParameters(
                        format!("Missing required argument: {}", name)
                    ));
                },
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// ToolRegistry manages tool registration and discovery.
///
/// Registration happens once at startup; afterwards the registry is shared
/// read-only behind an `Arc`.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool with the registry
    pub fn register_tool(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.definition().name;

        if self.tools.contains_key(&name) {
            return Err(ToolError::RegistrationFailed(
                format!("Tool with name '{}' already registered", name)
            ));
        }

        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all registered tools in registration order
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool(&'static str);

    #[async_trait]
    impl Tool for EchoTool {
        fn definition(&self) -> ToolDescriptor {
            ToolDescriptor {
                name: self.0.to_string(),
                description: "echo".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {"value": {"type": "string"}},
                    "required": ["value"]
                }),
            }
        }

        async fn execute(&self, params: Value) -> ToolResult {
            self.validate_params(&params)?;
            Ok(params)
        }
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = ToolRegistry::new();
        registry.register_tool(Arc::new(EchoTool("echo"))).unwrap();
        let err = registry.register_tool(Arc::new(EchoTool("echo"))).unwrap_err();
        assert!(matches!(err, ToolError::RegistrationFailed(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["c", "a", "b"] {
            registry.register_tool(Arc::new(EchoTool(name))).unwrap();
        }
        let names: Vec<_> = registry.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_validate_params_rejects_missing_required() {
        let tool = EchoTool("echo");
        assert!(tool.execute(json!({"value": "x"})).await.is_ok());
        assert!(matches!(
            tool.execute(json!({})).await,
            Err(ToolError::InvalidParameters(_))
        ));
        assert!(matches!(
            tool.execute(json!({"value": null})).await,
            Err(ToolError::InvalidParameters(_))
        ));
        assert!(matches!(
            tool.execute(json!(["value"])).await,
            Err(ToolError::InvalidParameters(_))
        ));
    }
}
