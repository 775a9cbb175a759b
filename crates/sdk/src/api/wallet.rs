//! Wallet API endpoints.

use crate::client::MonoClient;
use crate::error::MonoResult;
use crate::transport::Query;

/// Wallet API for the business's Mono wallet.
pub struct WalletApi<'a> {
    client: &'a MonoClient,
}

impl<'a> WalletApi<'a> {
    pub(crate) fn new(client: &'a MonoClient) -> Self {
        Self { client }
    }

    /// Available balance in the Mono wallet.
    pub async fn balance(&self) -> MonoResult<String> {
        self.client
            .http
            .get(&["users", "stats", "wallet"], &Query::new())
            .await
    }
}
