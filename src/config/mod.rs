//! config
//!
//! Local configuration store for the `atr` client.
//!
//! # Location
//!
//! 1. `$ATR_CLIENT_CONFIG_PATH` if set (a leading `~/` is expanded)
//! 2. `<user config dir>/atr/atr.yaml`
//!
//! # Concurrency
//!
//! All access goes through [`ConfigStore::view`] or [`ConfigStore::update`],
//! which hold a [`ConfigLock`] for the whole read (and write). Writes are
//! atomic: the document is written to a temp file which is then renamed over
//! the original.
//!
//! # Example
//!
//! ```no_run
//! use atrclient::config::ConfigStore;
//!
//! let store = ConfigStore::from_env().unwrap();
//! store.set_string("atr.host", "release-test.apache.org").unwrap();
//! assert_eq!(
//!     store.get_string("atr.host").unwrap().as_deref(),
//!     Some("release-test.apache.org")
//! );
//! ```

mod lock;
pub mod schema;
pub mod walk;

pub use lock::{ConfigLock, DEFAULT_LOCK_TIMEOUT};
pub use schema::ConfigFile;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Environment variable overriding the configuration path.
pub const CONFIG_PATH_ENV: &str = "ATR_CLIENT_CONFIG_PATH";

/// Host used when `atr.host` is not configured.
pub const DEFAULT_HOST: &str = "release-test.apache.org";

/// Development hosts served with self-signed certificates.
const LOCAL_DOMAINS: &[&str] = &["localhost.apache.org", "127.0.0.1"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid atr.yaml: {0}")]
    Invalid(String),

    #[error("failed to read config file '{}'", path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file '{}'", path.display())]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Not a valid configuration key: '{0}'")]
    InvalidKey(String),

    #[error("cannot set below '{0}': it holds a value, not a table")]
    NotATable(String),

    #[error("config lock error: {0}")]
    Lock(String),

    #[error("timed out waiting for config lock '{}'", .0.display())]
    LockTimeout(PathBuf),

    #[error("configuration directory not found")]
    NoConfigDir,
}

/// Server location derived from `atr.host`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// The configured value with any scheme removed, e.g. `localhost.apache.org:8080`.
    pub name: String,
    /// Scheme and authority, e.g. `https://localhost.apache.org:8080`.
    pub origin: String,
    /// Whether TLS certificates are verified.
    pub verify_tls: bool,
}

impl Host {
    /// Interpret a configured host value.
    ///
    /// A bare `host[:port]` is served over HTTPS. A value with an explicit
    /// `http://` or `https://` scheme is used as the origin verbatim.
    pub fn parse(value: &str) -> Self {
        let value = value.trim_end_matches('/');
        let (origin, name) = match value.split_once("://") {
            Some((_, rest)) => (value.to_string(), rest.to_string()),
            None => (format!("https://{}", value), value.to_string()),
        };
        let domain = name.split(':').next().unwrap_or_default();
        let verify_tls = !LOCAL_DOMAINS.contains(&domain);
        Self {
            name,
            origin,
            verify_tls,
        }
    }

    /// Host name without port.
    pub fn domain(&self) -> &str {
        self.name.split(':').next().unwrap_or_default()
    }

    /// Base URL of the JSON API.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.origin)
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::parse(DEFAULT_HOST)
    }
}

/// Handle on the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store for an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the default location.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoConfigDir`] if no override is set and the platform
    /// has no user configuration directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Resolve the configuration path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Ok(value) = std::env::var(CONFIG_PATH_ENV) {
            if !value.is_empty() {
                return Ok(expand_home(&value));
            }
        }
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("atr").join("atr.yaml"))
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the sibling lock file.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Read the document without taking the lock.
    ///
    /// Returns [`schema::defaults`] if the file does not exist.
    pub fn read(&self) -> Result<Mapping, ConfigError> {
        if !self.path.exists() {
            return Ok(schema::defaults());
        }

        tracing::debug!(path = %self.path.display(), "reading configuration");
        let contents = fs::read_to_string(&self.path).map_err(|e| ConfigError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        let value: Value =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let doc = match value {
            Value::Null => Mapping::new(),
            Value::Mapping(doc) => doc,
            _ => return Err(ConfigError::Invalid("not a dictionary".into())),
        };
        schema::validate(&doc)?;
        Ok(doc)
    }

    /// Write the document without taking the lock.
    ///
    /// Empty top-level tables are dropped. If nothing remains the file is
    /// deleted.
    pub fn write(&self, doc: &Mapping) -> Result<(), ConfigError> {
        let doc: Mapping = doc
            .iter()
            .filter(|(_, v)| !matches!(v, Value::Mapping(m) if m.is_empty()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if doc.is_empty() {
            if self.path.exists() {
                tracing::debug!(path = %self.path.display(), "removing empty configuration");
                fs::remove_file(&self.path).map_err(|e| self.write_error(e))?;
            }
            return Ok(());
        }

        schema::validate(&doc)?;
        let contents = serde_yaml::to_string(&Value::Mapping(doc))
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| self.write_error(e))?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&temp_path, perms).map_err(|e| self.write_error(e))?;
        }

        file.write_all(contents.as_bytes())
            .map_err(|e| self.write_error(e))?;
        file.sync_all().map_err(|e| self.write_error(e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| self.write_error(e))?;
        tracing::debug!(path = %self.path.display(), "wrote configuration");
        Ok(())
    }

    /// Run `f` on the document while holding the lock.
    pub fn view<T>(&self, f: impl FnOnce(&Mapping) -> T) -> Result<T, ConfigError> {
        let _lock = ConfigLock::acquire(&self.lock_path(), DEFAULT_LOCK_TIMEOUT)?;
        let doc = self.read()?;
        Ok(f(&doc))
    }

    /// Run `f` on the document while holding the lock, then write it back.
    ///
    /// Nothing is written if `f` fails.
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut Mapping) -> Result<T, ConfigError>,
    ) -> Result<T, ConfigError> {
        let _lock = ConfigLock::acquire(&self.lock_path(), DEFAULT_LOCK_TIMEOUT)?;
        let mut doc = self.read()?;
        let out = f(&mut doc)?;
        self.write(&doc)?;
        Ok(out)
    }

    /// Get the value at a dotted key.
    pub fn get_value(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        let parts = walk::parse_key(key)?;
        self.view(|doc| walk::get(doc, &parts).cloned())
    }

    /// Get the string value at a dotted key.
    ///
    /// Non-string values are treated as absent.
    pub fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self
            .get_value(key)?
            .and_then(|v| schema::scalar_string(&v)))
    }

    /// Set a string value at a dotted key. Returns whether it changed.
    pub fn set_string(&self, key: &str, value: &str) -> Result<bool, ConfigError> {
        let parts = walk::parse_key(key)?;
        self.update(|doc| walk::set(doc, &parts, Value::from(value)))
    }

    /// Remove the value at a dotted key, returning it if present.
    pub fn drop_key(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        let parts = walk::parse_key(key)?;
        self.update(|doc| Ok(walk::remove(doc, &parts)))
    }

    /// The configured server.
    pub fn host(&self) -> Result<Host, ConfigError> {
        Ok(self
            .get_string("atr.host")?
            .map(|h| Host::parse(&h))
            .unwrap_or_default())
    }

    /// The configured ASF UID.
    pub fn asf_uid(&self) -> Result<Option<String>, ConfigError> {
        self.get_string("asf.uid")
    }

    fn write_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::WriteError {
            path: self.path.clone(),
            source,
        }
    }
}

fn expand_home(value: &str) -> PathBuf {
    if value == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = value.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(value)
}

/// Render a configuration value for display.
///
/// Strings print bare; anything else prints as YAML.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, ConfigStore) {
        let temp = TempDir::new().expect("create temp dir");
        let store = ConfigStore::new(temp.path().join("atr.yaml"));
        (temp, store)
    }

    #[test]
    fn missing_file_reads_defaults() {
        let (_temp, store) = temp_store();
        let doc = store.read().unwrap();
        assert_eq!(doc, schema::defaults());
    }

    #[test]
    fn write_then_delete_when_empty() {
        let (_temp, store) = temp_store();
        let mut doc = Mapping::new();
        walk::set(&mut doc, &["atr", "host"], Value::from("example.invalid")).unwrap();
        store.write(&doc).unwrap();
        assert!(store.path().exists());

        store.write(&Mapping::new()).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn write_filters_empty_tables() {
        let (_temp, store) = temp_store();
        let doc: Mapping = serde_yaml::from_str("atr: {}\nasf:\n  uid: \"\"\n").unwrap();
        store.write(&doc).unwrap();

        let read = store.read().unwrap();
        assert!(read.get("atr").is_none());
        assert_eq!(
            walk::get(&read, &["asf", "uid"]).and_then(Value::as_str),
            Some("")
        );
    }

    #[test]
    fn write_rejects_unknown_keys() {
        let (_temp, store) = temp_store();
        let mut doc = Mapping::new();
        walk::set(&mut doc, &["abc", "pqr"], Value::from("x")).unwrap();
        assert!(matches!(store.write(&doc), Err(ConfigError::Invalid(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn read_rejects_non_mapping() {
        let (_temp, store) = temp_store();
        fs::write(store.path(), "- a\n- b\n").unwrap();
        let err = store.read().unwrap_err();
        assert!(err.to_string().starts_with("Invalid atr.yaml"));
    }

    #[test]
    fn empty_file_is_empty_document() {
        let (_temp, store) = temp_store();
        fs::write(store.path(), "").unwrap();
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn set_get_drop_through_store() {
        let (_temp, store) = temp_store();
        assert!(store.set_string("asf.uid", "alice").unwrap());
        assert_eq!(store.asf_uid().unwrap().as_deref(), Some("alice"));

        let removed = store.drop_key("asf.uid").unwrap();
        assert_eq!(removed, Some(Value::from("alice")));
        assert_eq!(store.asf_uid().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn numeric_uid_reads_as_string() {
        let (_temp, store) = temp_store();
        fs::write(store.path(), "asf:\n  uid: 12345\n").unwrap();
        assert_eq!(store.asf_uid().unwrap().as_deref(), Some("12345"));
        assert_eq!(store.get_string("asf.uid").unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn failed_update_writes_nothing() {
        let (_temp, store) = temp_store();
        store.set_string("atr.host", "example.invalid").unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let result = store.update(|doc| {
            walk::set(doc, &["atr", "host"], Value::from("changed"))?;
            Err::<(), _>(ConfigError::InvalidKey("x".into()))
        });
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_private() {
        let (_temp, store) = temp_store();
        store.set_string("tokens.pat", "secret").unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn lock_path_appends_suffix() {
        let store = ConfigStore::new("/tmp/x/atr.yaml");
        assert_eq!(store.lock_path(), PathBuf::from("/tmp/x/atr.yaml.lock"));
    }

    #[test]
    fn host_defaults_and_tls() {
        let (_temp, store) = temp_store();
        let host = store.host().unwrap();
        assert_eq!(host.api_base(), "https://release-test.apache.org/api");
        assert!(host.verify_tls);

        store.set_string("atr.host", "localhost.apache.org:8080").unwrap();
        let host = store.host().unwrap();
        assert_eq!(host.api_base(), "https://localhost.apache.org:8080/api");
        assert_eq!(host.domain(), "localhost.apache.org");
        assert!(!host.verify_tls);
    }

    #[test]
    fn host_with_scheme_is_verbatim() {
        let host = Host::parse("http://127.0.0.1:9000/");
        assert_eq!(host.api_base(), "http://127.0.0.1:9000/api");
        assert_eq!(host.domain(), "127.0.0.1");
        assert!(!host.verify_tls);
    }

    #[test]
    fn display_value_formats() {
        assert_eq!(display_value(&Value::from("x")), "x");
        assert_eq!(display_value(&Value::from(3)), "3");
    }
}
