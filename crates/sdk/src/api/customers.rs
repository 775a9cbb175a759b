//! Customers API endpoints.

use crate::client::MonoClient;
use crate::error::MonoResult;
use crate::transport::Query;

/// Customers API.
pub struct CustomersApi<'a> {
    client: &'a MonoClient,
}

impl<'a> CustomersApi<'a> {
    pub(crate) fn new(client: &'a MonoClient) -> Self {
        Self { client }
    }

    /// List customers, optionally filtered by phone or email.
    pub async fn list(
        &self,
        phone: Option<&str>,
        email: Option<&str>,
        page: Option<u32>,
    ) -> MonoResult<String> {
        let query = Query::new()
            .push_opt("page", page.map(|p| p.to_string()))
            .push_opt("phone", phone)
            .push_opt("email", email);

        self.client.http.get(&["v2", "customers"], &query).await
    }

    /// Transactions across a customer's linked accounts.
    pub async fn transactions(
        &self,
        customer_id: &str,
        period: &str,
        page: u32,
        account_id: Option<&str>,
    ) -> MonoResult<String> {
        let query = Query::new()
            .push("period", period)
            .push("page", page.to_string())
            .push_opt("account", account_id);

        self.client
            .http
            .get(&["v2", "customers", customer_id, "transactions"], &query)
            .await
    }
}
