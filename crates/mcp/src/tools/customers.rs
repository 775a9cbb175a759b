// Customer tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_integer, json_schema_object, json_schema_string, parse_args, respond, Tool,
};
use anyhow::Result;
use mono_sdk::MonoClient;
use serde::Deserialize;
use std::sync::Arc;

/// Tool to list customers
pub struct ListCustomersTool {
    client: Arc<MonoClient>,
}

impl ListCustomersTool {
    pub fn new(client: Arc<MonoClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListCustomersArgs {
    phone: Option<String>,
    email: Option<String>,
    page: Option<u32>,
}

#[async_trait::async_trait]
impl Tool for ListCustomersTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_all_customers".to_string(),
            title: Some("Get All Customers".to_string()),
            description: "List the customers on your Mono business, optionally filtered by phone number or email".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "phone": json_schema_string("Filter by customer phone number"),
                    "email": json_schema_string("Filter by customer email address"),
                    "page": json_schema_integer("Page of results to return")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListCustomersArgs = parse_args("get_all_customers", arguments)?;

        let outcome = self
            .client
            .customers()
            .list(args.phone.as_deref(), args.email.as_deref(), args.page)
            .await;
        Ok(respond("get_all_customers", outcome))
    }
}

/// Tool to fetch transactions across a customer's linked accounts
pub struct CustomerTransactionsTool {
    client: Arc<MonoClient>,
}

impl CustomerTransactionsTool {
    pub fn new(client: Arc<MonoClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerTransactionsArgs {
    customer_id: String,
    period: String,
    page: u32,
    account_id: Option<String>,
}

#[async_trait::async_trait]
impl Tool for CustomerTransactionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_customer_transactions".to_string(),
            title: Some("Get Customer Transactions".to_string()),
            description: "Return transactions across all accounts linked to a customer".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "customerId": json_schema_string("The customer ID"),
                    "period": json_schema_string("Period to cover, e.g. last12months"),
                    "page": json_schema_integer("Page of results to return"),
                    "accountId": json_schema_string("Restrict results to one linked account")
                }),
                vec!["customerId", "period", "page"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CustomerTransactionsArgs = parse_args("get_customer_transactions", arguments)?;

        let outcome = self
            .client
            .customers()
            .transactions(
                &args.customer_id,
                &args.period,
                args.page,
                args.account_id.as_deref(),
            )
            .await;
        Ok(respond("get_customer_transactions", outcome))
    }
}
