//! auth - JWT lifecycle for the ATR API
//!
//! Authenticated API calls carry a short-lived JWT obtained by exchanging a
//! long-lived Personal Access Token (PAT). Both live in the configuration
//! file under `tokens`.
//!
//! # Components
//!
//! - [`jwt`] - Unverified decoding of stored tokens
//! - [`TokenProvider`] - Trait for providing bearer tokens to the API client
//! - [`JwtManager`] - Implementation of TokenProvider over [`ConfigStore`]
//!
//! # Security
//!
//! Tokens never appear in logs, error messages or debug output. The only
//! commands that print them are the ones that exist to do so (`jwt show`,
//! `jwt refresh`).
//!
//! [`ConfigStore`]: crate::config::ConfigStore

mod errors;
pub mod jwt;
mod provider;

pub use errors::AuthError;
pub use provider::{JwtManager, ASF_UID_KEY, JWT_KEY, PAT_KEY};

/// Trait for providing bearer tokens to the API client.
///
/// # Example
///
/// ```ignore
/// use atrclient::auth::TokenProvider;
///
/// async fn authorization(provider: &dyn TokenProvider) -> Result<String, AuthError> {
///     Ok(format!("Bearer {}", provider.bearer_token().await?))
/// }
/// ```
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a usable bearer token, refreshing if necessary.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NoStoredAsfUid`] if there is no token and no ASF UID
    /// - [`AuthError::NoPayloadAsfUid`] if an expired token names no subject
    /// - [`AuthError::NoPat`] if a refresh is needed but no PAT is stored
    /// - [`AuthError::RefreshFailed`] if the PAT exchange fails
    async fn bearer_token(&self) -> Result<String, AuthError>;
}
