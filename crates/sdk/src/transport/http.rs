//! HTTP transport layer for the Mono SDK.

use crate::config::ClientConfig;
use crate::error::{MonoError, MonoResult};
use reqwest::{header, Client, RequestBuilder};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Header carrying the Mono secret key.
pub const SECRET_KEY_HEADER: &str = "mono-sec-key";

/// HTTP transport for making API requests.
///
/// Every call is a single attempt. Successful bodies are parsed as JSON and
/// handed back as pretty-printed text.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> MonoResult<Self> {
        if config.secret_key.trim().is_empty() {
            return Err(MonoError::Config("secret key is required".to_string()));
        }

        let mut headers = header::HeaderMap::new();

        let mut secret = header::HeaderValue::from_str(&config.secret_key)
            .map_err(|_| MonoError::Config("Invalid secret key format".to_string()))?;
        secret.set_sensitive(true);
        headers.insert(header::HeaderName::from_static(SECRET_KEY_HEADER), secret);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Build a URL from path segments. Each segment is percent-encoded.
    fn build_url(&self, segments: &[&str]) -> MonoResult<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                MonoError::Config(format!(
                    "Base URL cannot carry a path: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request once and format the JSON body.
    async fn execute(&self, request_builder: RequestBuilder) -> MonoResult<String> {
        let response = request_builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Mono API returned an error status");
            return Err(MonoError::from_response(status, &body));
        }

        let bytes = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        to_pretty_text(&value)
    }

    /// Execute a GET request. Absent query parameters are never sent.
    pub async fn get(&self, segments: &[&str], query: &Query) -> MonoResult<String> {
        let url = self.build_url(segments)?;
        debug!(url = %url, params = query.len(), "GET request");

        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query.pairs());
        }
        self.execute(request).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<B: Serialize>(&self, segments: &[&str], body: &B) -> MonoResult<String> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "POST request");

        let payload = serde_json::to_vec(body)?;
        self.execute(self.client.post(url).body(payload)).await
    }
}

/// Query string assembled from optional parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter that is always sent.
    pub fn push(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.pairs.push((key, value.into()));
        self
    }

    /// Add a parameter only when it has a non-empty value.
    pub fn push_opt(mut self, key: &'static str, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            let value = value.into();
            if !value.is_empty() {
                self.pairs.push((key, value));
            }
        }
        self
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Re-serialize a JSON value with two-space indentation.
pub fn to_pretty_text(value: &serde_json::Value) -> MonoResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
