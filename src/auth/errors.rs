//! auth::errors
//!
//! Error types for JWT handling.
//!
//! Messages never contain the PAT or the JWT itself.
//!
//! # Example
//!
//! ```
//! use atrclient::auth::AuthError;
//!
//! let err = AuthError::NoPat;
//! assert_eq!(err.to_string(), "No Personal Access Token stored.");
//! ```

use thiserror::Error;

use crate::config::ConfigError;

/// Errors from JWT operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// `tokens.pat` is not set.
    #[error("No Personal Access Token stored.")]
    NoPat,

    /// A refresh was requested without an ASF UID.
    #[error("No ASF UID provided and asf.uid not configured.")]
    NoAsfUid,

    /// No JWT is stored and `asf.uid` is not set.
    #[error("No ASF UID stored in configuration.")]
    NoStoredAsfUid,

    /// The stored JWT has expired and does not name its subject.
    #[error("No ASF UID in JWT payload.")]
    NoPayloadAsfUid,

    /// The JWT header is not `{"alg":"HS256","typ":"JWT"}`.
    #[error("Invalid JWT header.")]
    InvalidHeader,

    /// The JWT could not be split or decoded.
    #[error("Failed to decode JWT: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),

    /// The PAT exchange failed.
    #[error("{0}")]
    RefreshFailed(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
