//! Error taxonomy for searches and endpoint configuration.

use thiserror::Error;

/// Why a search produced no new results.
///
/// Every variant is recoverable: the session turns it into a message for the
/// user, who can simply search again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The HTTP exchange itself did not complete (DNS, connect, TLS, I/O).
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("search service returned {status}: {body}")]
    Service { status: u16, body: String },
    /// The body could not be decoded as a search response.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::MalformedResponse(err.to_string())
    }
}

/// The search endpoint could not be assembled from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no search host configured (set --host, TYPESENSE_HOST or [search].host)")]
    MissingHost,
    #[error("no search API key configured (set --api-key, TYPESENSE_SEARCH_KEY or [search].api_key)")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_mentions_status_and_body() {
        let err = SearchError::Service {
            status: 500,
            body: "server error".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("server error"));
    }
}
