use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the geodata and geolocation clients.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body was not valid JSON of the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but violated the provider schema.
    #[error("malformed provider response for {context}: {reason}")]
    Schema { context: String, reason: String },

    /// The provider reported an error in an otherwise successful response.
    #[error("provider error: {0}")]
    Provider(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Coarse classification surfaced to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The provider could not be reached.
    Network,
    /// The provider was reached but its answer was unusable.
    Provider,
}

impl LocatorError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            LocatorError::Http(e) if !e.is_builder() && !e.is_decode() => FailureKind::Network,
            _ => FailureKind::Provider,
        }
    }
}
