//! cli
//!
//! Command-line interface layer for atr.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Build the [`Context`] shared by every handler
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers read and write configuration through
//! [`ConfigStore`] and talk to the server through [`ApiClient`]; neither
//! touches the file or the network directly.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::sync::{Arc, OnceLock};

use anyhow::{anyhow, Result};

use crate::api::ApiClient;
use crate::auth::JwtManager;
use crate::config::{ConfigStore, Host};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context::new(cli.debug);
    commands::dispatch(cli.command, &ctx)
}

/// State shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    /// Whether `--debug` was given.
    pub debug: bool,
    /// The configuration file, resolved on first use.
    store: OnceLock<ConfigStore>,
}

impl Context {
    /// Build a context over the configuration file named by the environment.
    ///
    /// The path is not resolved until a handler asks for [`Context::store`],
    /// so commands that never touch the configuration cannot fail on it.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            store: OnceLock::new(),
        }
    }

    /// Build a context over an explicit configuration file.
    pub fn with_store(store: ConfigStore) -> Self {
        Self {
            debug: false,
            store: OnceLock::from(store),
        }
    }

    /// The configuration file.
    pub fn store(&self) -> Result<&ConfigStore> {
        if let Some(store) = self.store.get() {
            return Ok(store);
        }
        let store = ConfigStore::from_env()?;
        Ok(self.store.get_or_init(|| store))
    }

    /// The configured server.
    pub fn host(&self) -> Result<Host> {
        Ok(self.store()?.host()?)
    }

    /// Token manager for the configured server.
    pub fn jwt_manager(&self) -> Result<JwtManager> {
        Ok(JwtManager::new(self.store()?.clone(), self.host()?))
    }

    /// API client that authenticates with the stored JWT.
    pub fn api(&self) -> Result<ApiClient> {
        let manager = self.jwt_manager()?;
        let host = self.host()?;
        Ok(ApiClient::with_provider(host, Arc::new(manager))?)
    }

    /// The given ASF UID, falling back to `asf.uid`.
    ///
    /// Fails with `missing` when neither is available.
    pub fn asf_uid(&self, given: Option<String>, missing: &str) -> Result<String> {
        match given {
            Some(uid) => Ok(uid),
            None => self.store()?.asf_uid()?.ok_or_else(|| anyhow!("{}", missing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context() -> (TempDir, Context) {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = Context::with_store(ConfigStore::new(temp.path().join("atr.yaml")));
        (temp, ctx)
    }

    #[test]
    fn new_defers_config_path() {
        let ctx = Context::new(true);
        assert!(ctx.debug);
        assert!(ctx.store.get().is_none());
    }

    #[test]
    fn with_store_uses_given_file() {
        let (temp, ctx) = context();
        assert_eq!(ctx.store().unwrap().path(), temp.path().join("atr.yaml"));
    }

    #[test]
    fn host_defaults_without_config() {
        let (_temp, ctx) = context();
        assert_eq!(ctx.host().unwrap(), Host::default());
    }

    #[test]
    fn asf_uid_prefers_argument() {
        let (_temp, ctx) = context();
        ctx.store().unwrap().set_string("asf.uid", "alice").unwrap();
        assert_eq!(ctx.asf_uid(Some("bob".into()), "missing").unwrap(), "bob");
        assert_eq!(ctx.asf_uid(None, "missing").unwrap(), "alice");
    }

    #[test]
    fn asf_uid_reports_missing() {
        let (_temp, ctx) = context();
        let err = ctx.asf_uid(None, "No ASF UID here.").unwrap_err();
        assert_eq!(err.to_string(), "No ASF UID here.");
    }

    #[test]
    fn api_client_targets_configured_host() {
        let (_temp, ctx) = context();
        ctx.store().unwrap().set_string("atr.host", "http://127.0.0.1:9").unwrap();
        let api = ctx.api().unwrap();
        assert_eq!(api.endpoint_url("/release/get"), "http://127.0.0.1:9/api/release/get");
    }
}
