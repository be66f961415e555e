use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("[{provider}] Request to {endpoint} failed: {source}")]
    Request {
        provider: &'static str,
        endpoint: String,
        #[source]
        source:   reqwest::Error,
    },

    #[error("[{provider}] Request to {endpoint} timed out")]
    Timeout { provider: &'static str, endpoint: String },

    #[error("[{provider}] {endpoint} responded with {status}")]
    Status {
        provider: &'static str,
        endpoint: String,
        status:   StatusCode,
    },

    #[error("[{provider}] Failed to decode response of {endpoint}: {source}")]
    Decode {
        provider: &'static str,
        endpoint: String,
        #[source]
        source:   serde_json::Error,
    },

    #[error("[{provider}] {endpoint} returned no rows")]
    Empty { provider: &'static str, endpoint: String },

    #[error("[{provider}] {endpoint} returned {received} of {expected} rows")]
    Incomplete {
        provider: &'static str,
        endpoint: String,
        received: u64,
        expected: u64,
    },

    #[error("[{provider}] Invalid url {url}: {reason}")]
    InvalidUrl {
        provider: &'static str,
        url:      String,
        reason:   String,
    },
}

impl ProviderError {
    /// Upstream HTTP status, when the provider answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            ProviderError::Request { source, .. } => source.status(),
            _ => None,
        }
    }

    pub fn is_decode(&self) -> bool { matches!(self, ProviderError::Decode { .. }) }
}
