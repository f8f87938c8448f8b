//! Error types for porclr-api

/// Result type for porclr-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the Portainer API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Credentials were rejected or the auth response was unusable
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The API answered with a non-success status
    #[error("API error from {endpoint} ({status}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// A success response lacked a required field
    #[error("Response from {endpoint} is missing field `{field}`")]
    MissingField { endpoint: String, field: String },

    /// A success response body could not be decoded
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL is unusable
    #[error("Invalid Portainer URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Transport-level failure (connection refused, DNS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Whether this error means the credentials were not accepted.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
