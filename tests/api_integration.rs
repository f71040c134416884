//! Integration tests for the ATR API client.
//!
//! Each test runs the client against a wiremock server addressed with an
//! explicit `http://` origin, so no TLS is involved.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atrclient::api::{self, ApiClient, ApiError, ProjectVersion, SshKeyAddArgs};
use atrclient::auth::{jwt, JwtManager, JWT_KEY, PAT_KEY};
use atrclient::config::{ConfigStore, Host};

// =============================================================================
// Test Fixtures
// =============================================================================

/// A mock server plus a configuration file pointing at it.
struct Fixture {
    server: MockServer,
    store: ConfigStore,
    _dir: TempDir,
}

impl Fixture {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = ConfigStore::new(dir.path().join("atr.yaml"));
        store
            .set_string("atr.host", &server.uri())
            .expect("failed to set host");
        Self {
            server,
            store,
            _dir: dir,
        }
    }

    fn host(&self) -> Host {
        Host::parse(&self.server.uri())
    }

    /// Client without credentials.
    fn anonymous(&self) -> ApiClient {
        ApiClient::new(self.host()).expect("failed to build client")
    }

    /// Client that authenticates with the stored JWT.
    fn authenticated(&self) -> ApiClient {
        let manager = JwtManager::new(self.store.clone(), self.host());
        ApiClient::with_provider(self.host(), Arc::new(manager)).expect("failed to build client")
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api{}", self.server.uri(), endpoint)
    }
}

fn release_json(phase: &str, revision: Option<&str>) -> serde_json::Value {
    json!({
        "name": "tooling-test-example-0.3",
        "project_name": "tooling-test-example",
        "version": "0.3",
        "phase": phase,
        "created": "2025-06-01T12:30:00Z",
        "latest_revision_number": revision,
        "package_managers": [],
    })
}

// =============================================================================
// GET
// =============================================================================

#[tokio::test]
async fn get_joins_path_segments() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/api/release/get/tooling-test-example/0.3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "endpoint": "/release/get",
            "release": release_json("release_candidate_draft", Some("00002")),
        })))
        .expect(1)
        .mount(&fx.server)
        .await;

    let results = fx
        .anonymous()
        .release_get("tooling-test-example", "0.3")
        .await
        .expect("release_get failed");

    assert_eq!(results.release.phase, "release_candidate_draft");
    assert_eq!(
        results.release.latest_revision_number.as_deref(),
        Some("00002")
    );
    assert_eq!(results.release.extra["package_managers"], json!([]));
}

#[tokio::test]
async fn get_skips_absent_optional_segment() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/api/checks/ongoing/p/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "endpoint": "/checks/ongoing",
            "ongoing": 3,
        })))
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/checks/ongoing/p/1.0/00004"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "endpoint": "/checks/ongoing",
            "ongoing": 0,
        })))
        .mount(&fx.server)
        .await;

    let client = fx.anonymous();
    let latest = client.checks_ongoing("p", "1.0", None).await.unwrap();
    let pinned = client.checks_ongoing("p", "1.0", Some("00004")).await.unwrap();
    assert_eq!(latest.ongoing, 3);
    assert_eq!(pinned.ongoing, 0);
}

#[tokio::test]
async fn get_reports_server_error_field() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/api/project/releases/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Project not found"})),
        )
        .mount(&fx.server)
        .await;

    let err = fx.anonymous().project_releases("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::Server { .. }));
    assert_eq!(
        err.to_string(),
        format!(
            "Project not found from {}",
            fx.url("/project/releases/missing")
        )
    );
}

#[tokio::test]
async fn get_reports_plain_failures() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/api/keys/user/alice"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&fx.server)
        .await;

    let err = fx.anonymous().keys_user("alice").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Request failed: 500 {}\nboom", fx.url("/keys/user/alice"))
    );
}

#[tokio::test]
async fn get_rejects_wrong_endpoint() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/api/release/revisions/p/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "endpoint": "/release/paths",
            "rel_paths": [],
        })))
        .mount(&fx.server)
        .await;

    let err = fx
        .anonymous()
        .release_revisions("p", "1.0")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected API response: expected endpoint /release/revisions, got /release/paths"
    );
}

#[tokio::test]
async fn get_rejects_non_json() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/api/key/get/ABCD"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&fx.server)
        .await;

    let err = fx.anonymous().key_get("ABCD").await.unwrap_err();
    assert_eq!(err.to_string(), "Unexpected API response: <html>");
}

// =============================================================================
// POST
// =============================================================================

#[tokio::test]
async fn post_sends_bearer_token_and_body() {
    let fx = Fixture::new().await;
    fx.store.set_string(JWT_KEY, jwt::DUMMY_TOKEN).unwrap();
    Mock::given(method("POST"))
        .and(path("/api/release/create"))
        .and(header("Authorization", "Bearer dummy_jwt_token"))
        .and(body_json(json!({"project": "tooling-test-example", "version": "0.3"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "endpoint": "/release/create",
            "release": release_json("release_candidate_draft", None),
        })))
        .expect(1)
        .mount(&fx.server)
        .await;

    let results = fx
        .authenticated()
        .release_create(&ProjectVersion::new("tooling-test-example", "0.3"))
        .await
        .expect("release_create failed");
    assert_eq!(results.release.name, "tooling-test-example-0.3");
    assert!(results.release.latest_revision_number.is_none());
}

#[tokio::test]
async fn post_reports_failure_status() {
    let fx = Fixture::new().await;
    fx.store.set_string(JWT_KEY, jwt::DUMMY_TOKEN).unwrap();
    Mock::given(method("POST"))
        .and(path("/api/ssh-key/add"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad key"))
        .mount(&fx.server)
        .await;

    let err = fx
        .authenticated()
        .ssh_key_add(&SshKeyAddArgs {
            text: "ssh-ed25519 AAAA".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "Error message from the API:\n400 {}\nbad key",
            fx.url("/ssh-key/add")
        )
    );
}

#[tokio::test]
async fn post_without_token_or_uid_fails_before_sending() {
    let fx = Fixture::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&fx.server)
        .await;

    let err = fx
        .authenticated()
        .release_delete(&ProjectVersion::new("p", "1.0"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No ASF UID stored in configuration.");
}

#[tokio::test]
async fn refresh_exchanges_pat_and_stores_jwt() {
    let fx = Fixture::new().await;
    fx.store.set_string(PAT_KEY, "pat-value").unwrap();
    fx.store.set_string("asf.uid", "alice").unwrap();
    Mock::given(method("POST"))
        .and(path("/api/jwt/create"))
        .and(body_json(json!({"asfuid": "alice", "pat": "pat-value"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "endpoint": "/jwt/create",
            "asfuid": "alice",
            "jwt": "new.jwt.value",
        })))
        .expect(1)
        .mount(&fx.server)
        .await;

    let manager = JwtManager::new(fx.store.clone(), fx.host());
    let token = manager.refresh(None).await.expect("refresh failed");
    assert_eq!(token, "new.jwt.value");
    assert_eq!(
        fx.store.get_string(JWT_KEY).unwrap().as_deref(),
        Some("new.jwt.value")
    );
}

#[tokio::test]
async fn refresh_reports_server_rejection() {
    let fx = Fixture::new().await;
    fx.store.set_string(PAT_KEY, "wrong").unwrap();
    Mock::given(method("POST"))
        .and(path("/api/jwt/create"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid PAT"))
        .mount(&fx.server)
        .await;

    let manager = JwtManager::new(fx.store.clone(), fx.host());
    let err = manager.refresh(Some("alice")).await.unwrap_err();
    assert!(err.to_string().starts_with("Error message from the API:\n401 "));
    assert!(fx.store.get_string(JWT_KEY).unwrap().is_none());
}

fn hs256_token(claims: serde_json::Value) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"server secret"),
    )
    .expect("failed to encode token")
}

fn jwt_create(asfuid: &str, jwt: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/jwt/create"))
        .and(body_json(json!({"asfuid": asfuid, "pat": "pat-value"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "endpoint": "/jwt/create",
            "asfuid": asfuid,
            "jwt": jwt,
        })))
        .expect(1)
}

#[tokio::test]
async fn usable_refreshes_expired_token_as_its_subject() {
    let fx = Fixture::new().await;
    fx.store.set_string(PAT_KEY, "pat-value").unwrap();
    fx.store.set_string("asf.uid", "bob").unwrap();
    let expired = hs256_token(json!({"sub": "alice", "exp": 1}));
    fx.store.set_string(JWT_KEY, &expired).unwrap();
    jwt_create("alice", "fresh.jwt.value").mount(&fx.server).await;

    let manager = JwtManager::new(fx.store.clone(), fx.host());
    assert_eq!(manager.usable().await.unwrap(), "fresh.jwt.value");
    assert_eq!(
        fx.store.get_string(JWT_KEY).unwrap().as_deref(),
        Some("fresh.jwt.value")
    );
}

#[tokio::test]
async fn usable_keeps_unexpired_token() {
    let fx = Fixture::new().await;
    let exp = chrono::Utc::now().timestamp() + 3600;
    let token = hs256_token(json!({"sub": "alice", "exp": exp}));
    fx.store.set_string(JWT_KEY, &token).unwrap();

    let manager = JwtManager::new(fx.store.clone(), fx.host());
    assert_eq!(manager.usable().await.unwrap(), token);
}

#[tokio::test]
async fn usable_without_token_refreshes_as_configured_uid() {
    let fx = Fixture::new().await;
    fx.store.set_string(PAT_KEY, "pat-value").unwrap();
    fx.store.set_string("asf.uid", "carol").unwrap();
    jwt_create("carol", "first.jwt.value").mount(&fx.server).await;

    let manager = JwtManager::new(fx.store.clone(), fx.host());
    assert_eq!(manager.usable().await.unwrap(), "first.jwt.value");
}

// =============================================================================
// Downloads
// =============================================================================

#[tokio::test]
async fn download_returns_bytes() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/dist/example-1.0.tar.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 1, 2, 3]))
        .mount(&fx.server)
        .await;

    let url = format!("{}/dist/example-1.0.tar.gz", fx.server.uri());
    let data = api::download(&url, false).await.unwrap();
    assert_eq!(data, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn download_reports_missing_url() {
    let fx = Fixture::new().await;
    let url = format!("{}/dist/missing.tar.gz.asc", fx.server.uri());
    let err = api::download(&url, false).await.unwrap_err();
    assert_eq!(err.to_string(), format!("URL not found: {}", url));
}
