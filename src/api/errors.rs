//! api::errors
//!
//! Error types for the ATR HTTP API.
//!
//! Display strings are what the user sees after `atr: error:`, so they
//! carry the request URL and server text but never the bearer token.
//!
//! # Example
//!
//! ```
//! use atrclient::api::ApiError;
//!
//! let err = ApiError::NotFound("https://example.invalid/a.tar.gz".into());
//! assert_eq!(err.to_string(), "URL not found: https://example.invalid/a.tar.gz");
//! ```

use thiserror::Error;

/// Errors from API requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A GET failed and the server explained why in an `error` field.
    #[error("{message} from {url}")]
    Server { message: String, url: String },

    /// A GET failed without a structured explanation.
    #[error("Request failed: {status} {url}\n{body}")]
    RequestFailed {
        status: u16,
        url: String,
        body: String,
    },

    /// A POST returned a status other than 200 or 201.
    #[error("Error message from the API:\n{status} {url}\n{body}")]
    PostFailed {
        status: u16,
        url: String,
        body: String,
    },

    /// A raw download returned a status other than 200.
    #[error("URL not found: {0}")]
    NotFound(String),

    /// The response was not JSON, named the wrong endpoint, or did not
    /// match the expected shape.
    #[error("Unexpected API response: {0}")]
    Unexpected(String),

    /// No bearer token could be obtained.
    #[error("{0}")]
    Auth(String),

    /// Transport failure before a response was received.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
