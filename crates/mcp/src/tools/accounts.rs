// Linked account tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_boolean, json_schema_enum, json_schema_object, json_schema_string, parse_args,
    respond, Tool,
};
use anyhow::Result;
use mono_sdk::{MonoClient, TransactionFilter, TransactionType};
use serde::Deserialize;
use std::sync::Arc;

/// Tool to list linked accounts
pub struct ListAccountsTool {
    client: Arc<MonoClient>,
}

impl ListAccountsTool {
    pub fn new(client: Arc<MonoClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListAccountsArgs {
    name: Option<String>,
    account_number: Option<String>,
}

#[async_trait::async_trait]
impl Tool for ListAccountsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_linked_accounts".to_string(),
            title: Some("Get Linked Accounts".to_string()),
            description: "List all accounts linked to your business, optionally filtered by account holder name or account number".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Filter by account holder name"),
                    "accountNumber": json_schema_string("Filter by account number")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListAccountsArgs = parse_args("get_linked_accounts", arguments)?;

        let outcome = self
            .client
            .accounts()
            .list(args.name.as_deref(), args.account_number.as_deref())
            .await;
        Ok(respond("get_linked_accounts", outcome))
    }
}

/// Single-account reads that only take an account ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountLookup {
    Details,
    Identity,
    Balance,
    Credits,
    Debits,
    Income,
}

impl AccountLookup {
    pub const ALL: [AccountLookup; 6] = [
        Self::Details,
        Self::Identity,
        Self::Balance,
        Self::Credits,
        Self::Debits,
        Self::Income,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Details => "get_account_information",
            Self::Identity => "get_account_identity",
            Self::Balance => "get_account_balance",
            Self::Credits => "get_account_credits",
            Self::Debits => "get_account_debits",
            Self::Income => "get_income_information",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Details => "Get Account Information",
            Self::Identity => "Get Account Identity",
            Self::Balance => "Get Account Balance",
            Self::Credits => "Get Account Credits",
            Self::Debits => "Get Account Debits",
            Self::Income => "Get Income Information",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Details => "Return the account details for a linked account",
            Self::Identity => "Return identity information of the holder of a linked account",
            Self::Balance => "Return the current balance of a linked account",
            Self::Credits => "Return all credit inflows on a linked account",
            Self::Debits => "Return all debit outflows on a linked account",
            Self::Income => "Return income information for a linked account",
        }
    }
}

/// Tool for the single-account reads in [`AccountLookup`]
pub struct AccountLookupTool {
    client: Arc<MonoClient>,
    lookup: AccountLookup,
}

impl AccountLookupTool {
    pub fn new(client: Arc<MonoClient>, lookup: AccountLookup) -> Self {
        Self { client, lookup }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountArgs {
    account_id: String,
}

#[async_trait::async_trait]
impl Tool for AccountLookupTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.lookup.name().to_string(),
            title: Some(self.lookup.title().to_string()),
            description: self.lookup.description().to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "accountId": json_schema_string("The ID of the linked account")
                }),
                vec!["accountId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let name = self.lookup.name();
        let args: AccountArgs = parse_args(name, arguments)?;

        let accounts = self.client.accounts();
        let outcome = match self.lookup {
            AccountLookup::Details => accounts.details(&args.account_id).await,
            AccountLookup::Identity => accounts.identity(&args.account_id).await,
            AccountLookup::Balance => accounts.balance(&args.account_id).await,
            AccountLookup::Credits => accounts.credits(&args.account_id).await,
            AccountLookup::Debits => accounts.debits(&args.account_id).await,
            AccountLookup::Income => accounts.income(&args.account_id).await,
        };
        Ok(respond(name, outcome))
    }
}

/// Tool to fetch the transaction history of a linked account
pub struct TransactionHistoryTool {
    client: Arc<MonoClient>,
}

impl TransactionHistoryTool {
    pub fn new(client: Arc<MonoClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionHistoryArgs {
    account_id: String,
    #[serde(rename = "type")]
    transaction_type: Option<TransactionType>,
    narration: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    paginate: Option<bool>,
}

#[async_trait::async_trait]
impl Tool for TransactionHistoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_transaction_history".to_string(),
            title: Some("Get Transaction History".to_string()),
            description: "Return the transaction history for a linked account".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "accountId": json_schema_string("The ID of the linked account"),
                    "startDate": json_schema_string("The beginning date for transaction consideration eg. 01-10-2020"),
                    "endDate": json_schema_string("The concluding date for transaction consideration, ensuring it comes after the provided start date. If start date is supplied, end date must also be supplied. eg. 07-10-2020"),
                    "type": json_schema_enum(&["debit", "credit"], "Filters transactions by debit or credit"),
                    "narration": json_schema_string("Filters transactions by narration text"),
                    "paginate": json_schema_boolean("Whether to paginate the results")
                }),
                vec!["accountId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: TransactionHistoryArgs = parse_args("get_transaction_history", arguments)?;

        let filter = TransactionFilter {
            transaction_type: args.transaction_type,
            narration: args.narration,
            start: args.start_date,
            end: args.end_date,
            paginate: args.paginate,
        };
        let outcome = self
            .client
            .accounts()
            .transactions(&args.account_id, &filter)
            .await;
        Ok(respond("get_transaction_history", outcome))
    }
}
