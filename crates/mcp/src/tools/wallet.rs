// Wallet tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, respond, Tool};
use anyhow::Result;
use mono_sdk::MonoClient;
use std::sync::Arc;

/// Tool to check the Mono wallet balance
pub struct WalletBalanceTool {
    client: Arc<MonoClient>,
}

impl WalletBalanceTool {
    pub fn new(client: Arc<MonoClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for WalletBalanceTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_wallet_balance".to_string(),
            title: Some("Get Wallet Balance".to_string()),
            description: "Check the available balance in your Mono wallet".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        Ok(respond("get_wallet_balance", self.client.wallet().balance().await))
    }
}
