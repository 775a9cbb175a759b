// MCP server: JSON-RPC dispatch over the tool and resource registries

use crate::protocol::*;
use crate::resources::{ResourceRegistry, ServerSettingsResource};
use crate::tools::{banking_registry, ToolRegistry};
use anyhow::Result;
use mono_sdk::MonoClient;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

pub const SERVER_NAME: &str = "mono-mcp-server";

/// Transport-agnostic MCP server. One instance is shared by every session.
pub struct McpServer {
    info: ServerInfo,
    tools: ToolRegistry,
    resources: ResourceRegistry,
}

impl McpServer {
    pub fn new(tools: ToolRegistry, resources: ResourceRegistry) -> Self {
        Self {
            info: server_info(),
            tools,
            resources,
        }
    }

    /// Server with every banking tool and the settings resource.
    pub fn with_banking_tools(client: Arc<MonoClient>) -> Result<Self> {
        let tools = banking_registry(client)?;

        let mut resources = ResourceRegistry::new();
        resources.register(Arc::new(ServerSettingsResource::new(server_info())))?;

        tracing::info!(
            tools = tools.len(),
            resources = resources.list().len(),
            "MCP server ready"
        );
        Ok(Self::new(tools, resources))
    }

    /// Handle one incoming message. Notifications yield `None`.
    pub async fn handle_message(&self, message: Value) -> Option<JsonRpcResponse> {
        let id = message.get("id").cloned();

        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejecting malformed request: {}", e);
                return Some(JsonRpcResponse::error(
                    id.unwrap_or(Value::Null),
                    JsonRpcError::invalid_request(e.to_string()),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                JsonRpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }

        let Some(id) = request.id else {
            self.handle_notification(&request.method);
            return None;
        };

        tracing::debug!(method = %request.method, "Handling request");

        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        };
        Some(response)
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => tracing::info!("Client initialized"),
            "notifications/cancelled" => tracing::debug!("Client cancelled a request"),
            other => tracing::debug!(method = other, "Ignoring notification"),
        }
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> std::result::Result<Value, JsonRpcError> {
        match method {
            "initialize" => {
                let params: InitializeParams = parse_params(params)?;
                self.initialize(params)
            }
            "ping" => Ok(json!({})),
            "tools/list" => to_result(ListToolsResult {
                tools: self.tools.list_schemas(),
            }),
            "tools/call" => {
                let params: CallToolParams = parse_params(params)?;
                self.call_tool(params).await
            }
            "resources/list" => to_result(ListResourcesResult {
                resources: self.resources.list(),
            }),
            "resources/read" => {
                let params: ReadResourceParams = parse_params(params)?;
                match self.resources.read(&params.uri).await {
                    Ok(Some(result)) => to_result(result),
                    Ok(None) => Err(JsonRpcError::resource_not_found(&params.uri)),
                    Err(e) => Err(JsonRpcError::internal_error(format!("{:#}", e))),
                }
            }
            "resources/templates/list" => Ok(json!({ "resourceTemplates": [] })),
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }

    fn initialize(&self, params: InitializeParams) -> std::result::Result<Value, JsonRpcError> {
        let protocol_version = negotiate_protocol_version(&params.protocol_version);
        tracing::info!(
            client = %params.client_info.name,
            client_version = %params.client_info.version,
            protocol_version,
            "Initializing session"
        );

        to_result(InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
        })
    }

    async fn call_tool(&self, params: CallToolParams) -> std::result::Result<Value, JsonRpcError> {
        let Some(tool) = self.tools.get(&params.name) else {
            return Err(JsonRpcError::invalid_params(format!(
                "Unknown tool: {}",
                params.name
            )));
        };

        tracing::info!(tool = %params.name, "Calling tool");
        match tool.execute(params.arguments).await {
            Ok(result) => to_result(result),
            Err(e) => Err(JsonRpcError::invalid_params(format!("{:#}", e))),
        }
    }
}

fn server_info() -> ServerInfo {
    ServerInfo {
        name: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn parse_params<T: DeserializeOwned>(
    params: Option<Value>,
) -> std::result::Result<T, JsonRpcError> {
    let params = params.unwrap_or_else(|| json!({}));
    serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}

fn to_result<T: serde::Serialize>(value: T) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
