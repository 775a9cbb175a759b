//! Error types for the Mono SDK.

use serde::Deserialize;

/// Result type for SDK operations.
pub type MonoResult<T> = Result<T, MonoError>;

/// Error types that can occur when talking to the Mono API.
#[derive(Debug, thiserror::Error)]
pub enum MonoError {
    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("HTTP error: {status} {reason}")]
    Api {
        status: u16,
        reason: String,
        details: Option<String>,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl MonoError {
    /// Create an API error from a status code and response body.
    ///
    /// Mono error bodies carry a `message` field; anything else is kept verbatim
    /// as details.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown Status").to_string();

        let details = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(error_response) => Some(error_response.message),
            Err(_) if body.trim().is_empty() => None,
            Err(_) => Some(body.to_string()),
        };

        Self::Api {
            status: status.as_u16(),
            reason,
            details,
        }
    }

    /// HTTP status code, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error body returned by the Mono API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}
