//! Accounts API endpoints.

use crate::client::MonoClient;
use crate::error::MonoResult;
use crate::transport::Query;
use serde::{Deserialize, Serialize};

/// Accounts API for linked bank accounts.
pub struct AccountsApi<'a> {
    client: &'a MonoClient,
}

impl<'a> AccountsApi<'a> {
    pub(crate) fn new(client: &'a MonoClient) -> Self {
        Self { client }
    }

    /// List linked accounts, optionally filtered by holder name or account number.
    pub async fn list(
        &self,
        name: Option<&str>,
        account_number: Option<&str>,
    ) -> MonoResult<String> {
        let query = Query::new()
            .push_opt("name", name)
            .push_opt("account_number", account_number);

        self.client.http.get(&["v2", "accounts"], &query).await
    }

    /// Account details.
    pub async fn details(&self, account_id: &str) -> MonoResult<String> {
        self.get(account_id, None).await
    }

    /// Identity of the account holder.
    pub async fn identity(&self, account_id: &str) -> MonoResult<String> {
        self.get(account_id, Some("identity")).await
    }

    /// Current balance.
    pub async fn balance(&self, account_id: &str) -> MonoResult<String> {
        self.get(account_id, Some("balance")).await
    }

    /// Transaction history with optional filters.
    pub async fn transactions(
        &self,
        account_id: &str,
        filter: &TransactionFilter,
    ) -> MonoResult<String> {
        self.client
            .http
            .get(&["v2", "accounts", account_id, "transactions"], &filter.to_query())
            .await
    }

    /// Credit inflows.
    pub async fn credits(&self, account_id: &str) -> MonoResult<String> {
        self.get(account_id, Some("credits")).await
    }

    /// Debit outflows.
    pub async fn debits(&self, account_id: &str) -> MonoResult<String> {
        self.get(account_id, Some("debits")).await
    }

    /// Income analysis for the account holder.
    pub async fn income(&self, account_id: &str) -> MonoResult<String> {
        self.get(account_id, Some("income")).await
    }

    async fn get(&self, account_id: &str, resource: Option<&str>) -> MonoResult<String> {
        let mut segments = vec!["v2", "accounts", account_id];
        segments.extend(resource);
        self.client.http.get(&segments, &Query::new()).await
    }
}

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

/// Optional filters for account transactions. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub narration: Option<String>,
    /// Start date, e.g. `01-10-2020`.
    pub start: Option<String>,
    /// End date, must come after `start`.
    pub end: Option<String>,
    pub paginate: Option<bool>,
}

impl TransactionFilter {
    fn to_query(&self) -> Query {
        Query::new()
            .push_opt("type", self.transaction_type.map(|t| t.as_str()))
            .push_opt("narration", self.narration.as_deref())
            .push_opt("start", self.start.as_deref())
            .push_opt("end", self.end.as_deref())
            .push_opt("paginate", self.paginate.map(|p| p.to_string()))
    }
}
