//! Main client for the Mono SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::error::{MonoError, MonoResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Mono API.
#[derive(Debug, Clone)]
pub struct MonoClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl MonoClient {
    /// Create a new client builder.
    pub fn builder() -> MonoClientBuilder {
        MonoClientBuilder::new()
    }

    /// Create a client from configuration.
    fn from_config(config: ClientConfig) -> MonoResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Get the wallet API.
    pub fn wallet(&self) -> WalletApi<'_> {
        WalletApi::new(self)
    }

    /// Get the customers API.
    pub fn customers(&self) -> CustomersApi<'_> {
        CustomersApi::new(self)
    }

    /// Get the accounts API.
    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    /// Get the company lookup API.
    pub fn lookup(&self) -> LookupApi<'_> {
        LookupApi::new(self)
    }

    /// Get the identity verification API.
    pub fn verification(&self) -> VerificationApi<'_> {
        VerificationApi::new(self)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Builder for creating a MonoClient.
pub struct MonoClientBuilder {
    base_url: Option<String>,
    secret_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl MonoClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            secret_key: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Override the base URL (defaults to the production host).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the secret key.
    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    /// Override the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a request timeout. Without one, calls wait indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> MonoResult<MonoClient> {
        let secret_key = self
            .secret_key
            .ok_or_else(|| MonoError::Config("secret_key is required".to_string()))?;

        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let config = ClientConfig {
            base_url,
            secret_key,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: self.timeout,
        };

        MonoClient::from_config(config)
    }
}

impl Default for MonoClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = MonoClient::builder().secret_key("test_sk").build().unwrap();

        assert_eq!(client.config().base_url.as_str(), "https://api.withmono.com/");
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert!(client.config().timeout.is_none());
    }

    #[test]
    fn test_builder_requires_secret_key() {
        let result = MonoClient::builder().build();
        assert!(matches!(result, Err(MonoError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let result = MonoClient::builder()
            .secret_key("test_sk")
            .base_url("not a url")
            .build();
        assert!(matches!(result, Err(MonoError::InvalidUrl(_))));
    }

    #[test]
    fn test_builder_overrides() {
        let client = MonoClient::builder()
            .secret_key("test_sk")
            .base_url("http://localhost:9000")
            .user_agent("custom/2.0")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(client.config().base_url.as_str(), "http://localhost:9000/");
        assert_eq!(client.config().user_agent, "custom/2.0");
        assert_eq!(client.config().timeout, Some(Duration::from_secs(5)));
    }
}
