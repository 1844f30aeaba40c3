use stockr_core::FormError;
use thiserror::Error;

/// Errors returned by the inventory backend client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid backend URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The add-item form failed validation; nothing was sent.
    #[error("invalid item: {0}")]
    Validation(#[from] FormError),
}
