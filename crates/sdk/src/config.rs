//! Configuration types for the Mono SDK.

use std::time::Duration;
use url::Url;

/// Production host of the Mono API.
pub const DEFAULT_BASE_URL: &str = "https://api.withmono.com";

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mono-Banking-MCP/1.0";

/// Configuration for the Mono client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the Mono API.
    pub base_url: Url,
    /// Secret key sent as `mono-sec-key`.
    pub secret_key: String,
    /// User agent string.
    pub user_agent: String,
    /// Optional request timeout. `None` means a call may wait indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL and secret key.
    pub fn new(base_url: Url, secret_key: impl Into<String>) -> Self {
        Self {
            base_url,
            secret_key: secret_key.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

// Keeps the secret key out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("secret_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let url = Url::parse(DEFAULT_BASE_URL).unwrap();
        let config = ClientConfig::new(url.clone(), "test_sk");

        assert_eq!(config.base_url, url);
        assert_eq!(config.user_agent, "Mono-Banking-MCP/1.0");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let url = Url::parse(DEFAULT_BASE_URL).unwrap();
        let config = ClientConfig::new(url, "live_sk_very_secret");

        let debug = format!("{:?}", config);
        assert!(!debug.contains("live_sk_very_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
