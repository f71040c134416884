//! config::schema
//!
//! Schema for `atr.yaml`.
//!
//! The file is read and written as a loose YAML mapping so that dot-notation
//! commands can address any key, but every document is checked against this
//! schema before use. Unknown keys and leaves that are not scalars are
//! rejected. Numbers and booleans are read as their string form, so
//! `uid: 12345` is the UID `"12345"`.
//!
//! ```yaml
//! atr:
//!   host: release-test.apache.org
//! asf:
//!   uid: example
//! tokens:
//!   pat: ...
//!   jwt: ...
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

use super::ConfigError;

/// Typed view of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub atr: Option<AtrSection>,
    pub asf: Option<AsfSection>,
    pub tokens: Option<TokensSection>,
}

/// Server settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AtrSection {
    #[serde(deserialize_with = "scalar")]
    pub host: Option<String>,
}

/// Identity settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AsfSection {
    #[serde(deserialize_with = "scalar")]
    pub uid: Option<String>,
}

/// Stored credentials.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TokensSection {
    #[serde(deserialize_with = "scalar")]
    pub pat: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub jwt: Option<String>,
}

// Tokens never appear in debug output.
impl std::fmt::Debug for TokensSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokensSection")
            .field("pat", &self.pat.as_ref().map(|_| "[REDACTED]"))
            .field("jwt", &self.jwt.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// The string form of a scalar leaf.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_string(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected a string")),
    }
}

/// The document used when no configuration file exists.
pub fn defaults() -> Mapping {
    let mut doc = Mapping::new();
    for section in ["asf", "atr", "tokens"] {
        doc.insert(Value::from(section), Value::Mapping(Mapping::new()));
    }
    doc
}

/// Check a document against the schema.
///
/// # Errors
///
/// [`ConfigError::Invalid`] describing the first offending key or value.
pub fn validate(doc: &Mapping) -> Result<ConfigFile, ConfigError> {
    serde_yaml::from_value(Value::Mapping(doc.clone()))
        .map_err(|e| ConfigError::Invalid(e.to_string()))
}
