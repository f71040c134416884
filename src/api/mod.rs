//! api
//!
//! HTTP client for the ATR JSON API.
//!
//! # Transport
//!
//! - GET requests are unauthenticated. Path segments are appended to the
//!   endpoint URL and absent optional segments are skipped.
//! - POST requests send a JSON body with a bearer JWT from the configured
//!   [`TokenProvider`]. A client built without a provider sends no
//!   `Authorization` header, which is how `/jwt/create` is called.
//! - Every JSON response names the `endpoint` it answered. A mismatch with
//!   the path called is reported as [`ApiError::Unexpected`].
//!
//! TLS certificates are verified unless the configured host is a local
//! development host (see [`Host`]).
//!
//! # Example
//!
//! ```ignore
//! use atrclient::api::ApiClient;
//! use atrclient::config::Host;
//!
//! let client = ApiClient::new(Host::parse("release-test.apache.org"))?;
//! let releases = client.project_releases("tooling-test-example").await?;
//! ```

mod endpoints;
mod errors;
pub mod models;

pub use errors::ApiError;
pub use models::*;

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auth::TokenProvider;
use crate::config::Host;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("atr/", env!("CARGO_PKG_VERSION"));

/// Client for one ATR server.
pub struct ApiClient {
    client: Client,
    host: Host,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("host", &self.host)
            .field("has_token_provider", &self.token_provider.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client that sends no credentials.
    pub fn new(host: Host) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client(host.verify_tls)?,
            host,
            token_provider: None,
        })
    }

    /// Create a client that authenticates POST requests with `provider`.
    pub fn with_provider(host: Host, provider: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client(host.verify_tls)?,
            host,
            token_provider: Some(provider),
        })
    }

    /// The server this client talks to.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Full URL of an endpoint path such as `/release/get`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.host.api_base(), path)
    }

    /// GET an endpoint and return the raw JSON.
    ///
    /// The URL is `<endpoint>/<segments joined by '/'>`, followed by each
    /// present optional segment.
    pub async fn get_json(
        &self,
        path: &str,
        segments: &[&str],
        optional: &[Option<&str>],
    ) -> Result<Value, ApiError> {
        let mut url = format!("{}/{}", self.endpoint_url(path), segments.join("/"));
        for segment in optional.iter().flatten() {
            url.push('/');
            url.push_str(segment);
        }

        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await?;
        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "GET response");

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(get_error(status, url, body));
        }
        read_json(response).await
    }

    /// GET an endpoint and validate the result type.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        segments: &[&str],
        optional: &[Option<&str>],
    ) -> Result<T, ApiError> {
        let value = self.get_json(path, segments, optional).await?;
        validate(path, value)
    }

    /// POST a JSON body to a full URL and return the raw JSON.
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        let mut request = self
            .client
            .post(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .json(body);
        if let Some(token) = self.bearer_token().await? {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::Auth("stored JWT is not a valid header value".into()))?;
            request = request.header(AUTHORIZATION, value);
        }

        tracing::debug!(%url, authenticated = self.token_provider.is_some(), "POST");
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "POST response");

        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::PostFailed {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        read_json(response).await
    }

    /// POST typed arguments to an endpoint and validate the result type.
    pub async fn post<A: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        args: &A,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(args)
            .map_err(|e| ApiError::Unexpected(format!("cannot encode request: {}", e)))?;
        let value = self.post_json(&self.endpoint_url(path), &body).await?;
        validate(path, value)
    }

    async fn bearer_token(&self) -> Result<Option<String>, ApiError> {
        match self.token_provider {
            Some(ref provider) => provider
                .bearer_token()
                .await
                .map(Some)
                .map_err(|e| ApiError::Auth(e.to_string())),
            None => Ok(None),
        }
    }
}

/// Download the raw bytes at `url`.
///
/// Any status other than 200 is reported as [`ApiError::NotFound`].
pub async fn download(url: &str, verify_tls: bool) -> Result<Vec<u8>, ApiError> {
    let client = build_http_client(verify_tls)?;
    tracing::debug!(%url, verify_tls, "download");
    let response = client
        .get(url)
        .header(USER_AGENT, USER_AGENT_VALUE)
        .send()
        .await?;
    if response.status() != StatusCode::OK {
        return Err(ApiError::NotFound(url.to_string()));
    }
    Ok(response.bytes().await?.to_vec())
}

fn build_http_client(verify_tls: bool) -> Result<Client, ApiError> {
    Client::builder()
        .danger_accept_invalid_certs(!verify_tls)
        .build()
        .map_err(ApiError::from)
}

/// Map a failed GET to an error, preferring the server's `error` text.
fn get_error(status: StatusCode, url: String, body: String) -> ApiError {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&body) {
        if let Some(error) = map.get("error") {
            let message = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return ApiError::Server { message, url };
        }
    }
    ApiError::RequestFailed {
        status: status.as_u16(),
        url,
        body,
    }
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|_| ApiError::Unexpected(text))
}

/// Check the `endpoint` field and deserialize.
pub(crate) fn validate<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ApiError> {
    match value.get("endpoint").and_then(Value::as_str) {
        Some(endpoint) if endpoint == path => {}
        Some(endpoint) => {
            return Err(ApiError::Unexpected(format!(
                "expected endpoint {}, got {}",
                path, endpoint
            )))
        }
        None => return Err(ApiError::Unexpected(value.to_string())),
    }
    serde_json::from_value(value).map_err(|e| ApiError::Unexpected(format!("{} ({})", e, path)))
}
