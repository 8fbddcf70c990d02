// Market data tool
//
// A single tool implementation backed by one catalog operation. Every
// entry of the catalog that is exposed as a tool is registered as one
// `MarketDataTool`.

use std::sync::Arc;
use async_trait::async_trait;
use serde_json::{json, Map, Number, Value};

use crate::catalog::{Operation, ToolSpec};
use crate::errors::ToolError;
use crate::mcp::protocol::ToolDescriptor;
use crate::tools::{Tool, ToolResult};
use crate::upstream::UpstreamClient;

/// Tool that relays one catalog operation to the upstream API
pub struct MarketDataTool {
    operation: &'static Operation,
    spec: &'static ToolSpec,
    client: Arc<UpstreamClient>,
}

impl MarketDataTool {
    pub fn new(
        operation: &'static Operation,
        spec: &'static ToolSpec,
        client: Arc<UpstreamClient>,
    ) -> Self {
        Self { operation, spec, client }
    }

    /// Convert call arguments into the upstream parameter list.
    ///
    /// Only declared parameters are forwarded. Scalars are stringified,
    /// null and empty strings count as absent.
    fn bind_arguments(&self, params: &Value) -> Result<Vec<(String, String)>, ToolError> {
        let empty = Map::new();
        let args = params.as_object().unwrap_or(&empty);

        let mut bound = Vec::new();
        for spec in self.operation.params {
            let value = match args.get(spec.name) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) if s.is_empty() => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(number_argument(n)),
                Some(Value::Bool(b)) => Some(b.to_string()),
                Some(_) => {
                    return Err(ToolError::InvalidParameters(
                        format!("Argument '{}' must be a string", spec.name)
                    ));
                }
            };

            match value {
                Some(value) => bound.push((spec.name.to_string(), value)),
                None if spec.required => {
                    return Err(ToolError::InvalidParameters(
                        format!("Missing required argument: {}", spec.name)
                    ));
                },
                None => {}
            }
        }

        Ok(bound)
    }
}

/// Integral numbers are forwarded without a fractional part, so `1.0` becomes `1`
fn number_argument(n: &Number) -> String {
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// JSON schema describing an operation's parameters
pub fn input_schema(operation: &Operation) -> Value {
    let mut properties = Map::new();
    for spec in operation.params {
        let mut property = json!({
            "type": "string",
            "description": spec.description,
            "examples": spec.examples,
        });
        if let Some(pattern) = spec.pattern {
            property["pattern"] = json!(pattern);
        }
        properties.insert(spec.name.to_string(), property);
    }

    let required: Vec<&str> = operation.required_params().map(|p| p.name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[async_trait]
impl Tool for MarketDataTool {
    fn definition(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.spec.name.to_string(),
            description: self.spec.description.to_string(),
            input_schema: input_schema(self.operation),
        }
    }

    async fn execute(&self, params: Value) -> ToolResult {
        self.validate_params(&params)?;
        let bound = self.bind_arguments(&params)?;

        let value = self.client.invoke(self.operation, &bound).await?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::testing::settings_for;
    use pretty_assertions::assert_eq;

    fn tool_named(name: &str) -> MarketDataTool {
        let catalog = Catalog::builtin().unwrap();
        let (operation, spec) = catalog.tools().find(|(_, tool)| tool.name == name).unwrap();
        let client = Arc::new(UpstreamClient::new(&settings_for("http://127.0.0.1:9")).unwrap());
        MarketDataTool::new(operation, spec, client)
    }

    #[test]
    fn test_gas_schema_requires_chainid() {
        let tool = tool_named("get_suggest_gas");
        let schema = tool.definition().input_schema;

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["chainid"]));
        assert_eq!(schema["properties"]["chainid"]["pattern"], "^[0-9]+$");
        assert_eq!(schema["properties"]["chainid"]["examples"][0], "1");
    }

    #[test]
    fn test_parameterless_schema() {
        let tool = tool_named("get_btc_trend");
        let schema = tool.definition().input_schema;
        assert_eq!(schema, json!({"type": "object", "properties": {}, "required": []}));
    }

    #[test]
    fn test_bind_arguments_forwards_declared_params_only() {
        let tool = tool_named("get_token_price");
        let bound = tool
            .bind_arguments(&json!({"symbol": "BTCUSDT", "extra": "ignored"}))
            .unwrap();
        assert_eq!(bound, vec![("symbol".to_string(), "BTCUSDT".to_string())]);
    }

    #[test]
    fn test_bind_arguments_skips_absent_optional() {
        let tool = tool_named("get_mini_24hr");
        assert!(tool.bind_arguments(&Value::Null).unwrap().is_empty());
        assert!(tool.bind_arguments(&json!({"symbol": ""})).unwrap().is_empty());
    }

    #[test]
    fn test_bind_arguments_stringifies_numbers() {
        let tool = tool_named("get_suggest_gas");
        let bound = tool.bind_arguments(&json!({"chainid": 137})).unwrap();
        assert_eq!(bound, vec![("chainid".to_string(), "137".to_string())]);
    }

    #[test]
    fn test_bind_arguments_drops_fraction_of_integral_floats() {
        let tool = tool_named("get_suggest_gas");
        let bound = tool.bind_arguments(&json!({"chainid": 1.0})).unwrap();
        assert_eq!(bound, vec![("chainid".to_string(), "1".to_string())]);

        let bound = tool.bind_arguments(&json!({"chainid": 1.5})).unwrap();
        assert_eq!(bound, vec![("chainid".to_string(), "1.5".to_string())]);
    }

    #[test]
    fn test_bind_arguments_rejects_structured_values() {
        let tool = tool_named("get_suggest_gas");
        assert!(matches!(
            tool.bind_arguments(&json!({"chainid": {"id": 1}})),
            Err(ToolError::InvalidParameters(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_chainid_is_rejected_before_any_request() {
        let tool = tool_named("get_suggest_gas");
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
        assert!(err.to_string().contains("chainid"));
    }
}
