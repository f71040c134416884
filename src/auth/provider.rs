//! auth::provider
//!
//! JwtManager - TokenProvider implementation backed by the configuration
//! file.
//!
//! # Lifecycle
//!
//! The JWT lives in `tokens.jwt`. When it is missing or expired it is
//! replaced by exchanging `tokens.pat` at `/jwt/create`:
//!
//! 1. No stored JWT: refresh as `asf.uid`
//! 2. Stored JWT with `exp` missing or in the past: refresh as the
//!    token's `sub`, warning if that differs from `asf.uid`
//! 3. Otherwise the stored JWT is used as is
//!
//! # Example
//!
//! ```ignore
//! use atrclient::auth::{JwtManager, TokenProvider};
//! use atrclient::config::ConfigStore;
//!
//! let store = ConfigStore::from_env()?;
//! let manager = JwtManager::new(store.clone(), store.host()?);
//! let token = manager.bearer_token().await?;
//! ```

use chrono::Utc;

use super::errors::AuthError;
use super::jwt::{self, Claims};
use super::TokenProvider;
use crate::api::{ApiClient, JwtCreateArgs};
use crate::config::{schema, walk, ConfigStore, Host};
use crate::ui::output;

/// Configuration key holding the JWT.
pub const JWT_KEY: &str = "tokens.jwt";

/// Configuration key holding the PAT.
pub const PAT_KEY: &str = "tokens.pat";

/// Configuration key holding the ASF UID.
pub const ASF_UID_KEY: &str = "asf.uid";

/// JWT manager.
///
/// Implements [`TokenProvider`] for [`ApiClient`]. Every read and write of
/// the tokens goes through the locked [`ConfigStore`].
#[derive(Debug, Clone)]
pub struct JwtManager {
    store: ConfigStore,
    host: Host,
}

impl JwtManager {
    pub fn new(store: ConfigStore, host: Host) -> Self {
        Self { store, host }
    }

    /// The stored JWT, if any.
    pub fn stored(&self) -> Result<Option<String>, AuthError> {
        Ok(self.store.get_string(JWT_KEY)?)
    }

    /// The stored JWT and its decoded claims.
    pub fn payload(&self) -> Result<Option<(String, Claims)>, AuthError> {
        match self.stored()? {
            Some(token) => {
                let claims = jwt::claims(&token)?;
                Ok(Some((token, claims)))
            }
            None => Ok(None),
        }
    }

    /// Exchange the PAT for a new JWT and store it.
    ///
    /// Uses `asf_uid` when given, otherwise `asf.uid`.
    pub async fn refresh(&self, asf_uid: Option<&str>) -> Result<String, AuthError> {
        let (pat, configured_uid) = self.store.view(|doc| {
            let read = |key: &str| {
                walk::parse_key(key)
                    .ok()
                    .and_then(|parts| walk::get(doc, &parts).cloned())
                    .and_then(|v| schema::scalar_string(&v))
            };
            (read(PAT_KEY), read(ASF_UID_KEY))
        })?;

        let pat = pat.ok_or(AuthError::NoPat)?;
        let asf_uid = asf_uid
            .map(str::to_string)
            .or(configured_uid)
            .ok_or(AuthError::NoAsfUid)?;

        tracing::debug!(host = %self.host.name, %asf_uid, "exchanging PAT for JWT");
        let client = ApiClient::new(self.host.clone())
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;
        let results = client
            .jwt_create(&JwtCreateArgs { asfuid: asf_uid, pat })
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

        self.store.set_string(JWT_KEY, &results.jwt)?;
        tracing::debug!("stored refreshed JWT");
        Ok(results.jwt)
    }

    /// A JWT that has not expired, refreshing if needed.
    pub async fn usable(&self) -> Result<String, AuthError> {
        let configured_uid = self.store.asf_uid()?;

        let Some((token, claims)) = self.payload()? else {
            tracing::debug!("no stored JWT");
            let asf_uid = configured_uid.ok_or(AuthError::NoStoredAsfUid)?;
            return self.refresh(Some(&asf_uid)).await;
        };

        if !jwt::is_expired(&claims, now()) {
            return Ok(token);
        }

        tracing::debug!(exp = jwt::expiry(&claims), "stored JWT has expired");
        let subject = jwt::subject(&claims).ok_or(AuthError::NoPayloadAsfUid)?;
        if let Some(warning) = uid_mismatch(subject, configured_uid.as_deref()) {
            output::warn(warning);
        }
        self.refresh(Some(subject)).await
    }
}

#[async_trait::async_trait]
impl TokenProvider for JwtManager {
    async fn bearer_token(&self) -> Result<String, AuthError> {
        self.usable().await
    }
}

/// Warning for refreshing as a subject other than `asf.uid`.
fn uid_mismatch(subject: &str, configured: Option<&str>) -> Option<String> {
    (configured != Some(subject)).then(|| {
        format!(
            "JWT ASF UID {} does not match configuration ASF UID {}",
            subject,
            configured.unwrap_or("None")
        )
    })
}

fn now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
