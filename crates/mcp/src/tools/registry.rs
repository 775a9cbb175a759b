// MCP tool registry and shared helpers for tool implementations

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::{bail, Context, Result};
use mono_sdk::MonoResult;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments.
    ///
    /// `Err` is reserved for arguments that do not match the schema; remote
    /// failures come back as an error envelope inside `Ok`.
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Names are unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.schema().name;
        if self.tools.contains_key(&name) {
            bail!("Tool already registered: {}", name);
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas, sorted by name
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserialize tool arguments. A missing arguments object counts as empty.
pub(crate) fn parse_args<T: DeserializeOwned>(
    tool: &str,
    arguments: serde_json::Value,
) -> Result<T> {
    let arguments = if arguments.is_null() {
        serde_json::json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).with_context(|| format!("Invalid arguments for {}", tool))
}

/// Wrap the outcome of a Mono API call in the tool result envelope.
pub(crate) fn respond(tool: &str, outcome: MonoResult<String>) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult::text(text),
        Err(e) => {
            tracing::error!(tool = tool, status = ?e.status(), "Mono API call failed: {}", e);
            CallToolResult::error(e.to_string())
        }
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_enum(values: &[&str], description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}

pub fn json_schema_integer(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "integer",
        "minimum": 1,
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mono_sdk::MonoError;
    use serde::Deserialize;

    struct EchoTool {
        name: &'static str,
    }

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name.to_string(),
                title: None,
                description: "Echo".to_string(),
                input_schema: json_schema_object(serde_json::json!({}), vec![]),
            }
        }

        async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
            Ok(CallToolResult::text(arguments.to_string()))
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" })).unwrap();

        let result = registry.register(Arc::new(EchoTool { name: "echo" }));
        assert!(result.is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_schemas_sorted_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "zeta" })).unwrap();
        registry.register(Arc::new(EchoTool { name: "alpha" })).unwrap();

        let names: Vec<String> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(registry.contains("zeta"));
        assert!(registry.get("missing").is_none());
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Args {
        account_id: String,
        narration: Option<String>,
    }

    #[test]
    fn test_parse_args() {
        let args: Args =
            parse_args("t", serde_json::json!({"accountId": "a1", "extra": true})).unwrap();
        assert_eq!(args.account_id, "a1");
        assert!(args.narration.is_none());

        let err = parse_args::<Args>("t", serde_json::Value::Null).unwrap_err();
        assert!(err.to_string().contains("Invalid arguments for t"));
    }

    #[test]
    fn test_respond_wraps_errors() {
        let result = respond("t", Err(MonoError::Config("bad".to_string())));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.first_text(), Some("Error: Configuration error: bad"));

        let result = respond("t", Ok("{}".to_string()));
        assert_eq!(result.is_error, None);
        assert_eq!(result.first_text(), Some("{}"));
    }
}
