use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the LoL Esports HTTP client.
///
/// Upstream failures are passed through as-is; the synchronizer decides what
/// to do with them at the tick boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, timeout, TLS error...
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-2xx status
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    /// Response body did not match the expected envelope
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
