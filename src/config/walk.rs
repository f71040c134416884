//! config::walk
//!
//! Dot-notation access into the configuration document.
//!
//! Keys such as `tokens.jwt` are split on `.` and walked through nested
//! YAML mappings. Intermediate tables are created on [`set`] and pruned on
//! [`remove`] once they become empty.
//!
//! # Example
//!
//! ```
//! use atrclient::config::walk;
//! use serde_yaml::{Mapping, Value};
//!
//! let mut doc = Mapping::new();
//! walk::set(&mut doc, &["atr", "host"], Value::from("example.invalid")).unwrap();
//! assert_eq!(
//!     walk::get(&doc, &["atr", "host"]).and_then(Value::as_str),
//!     Some("example.invalid")
//! );
//!
//! walk::remove(&mut doc, &["atr", "host"]);
//! assert!(doc.is_empty());
//! ```

use serde_yaml::{Mapping, Value};

use super::ConfigError;

/// Split a dotted key into its parts.
///
/// Empty keys and empty segments (`a..b`, `.a`) are rejected.
pub fn parse_key(key: &str) -> Result<Vec<&str>, ConfigError> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(ConfigError::InvalidKey(key.to_string()));
    }
    Ok(parts)
}

/// Look up the value at `parts`.
///
/// Returns `None` if any segment is missing or an intermediate value is not
/// a table.
pub fn get<'a>(doc: &'a Mapping, parts: &[&str]) -> Option<&'a Value> {
    let (last, parents) = parts.split_last()?;
    let mut table = doc;
    for part in parents {
        table = table.get(*part)?.as_mapping()?;
    }
    table.get(*last)
}

/// Store `value` at `parts`, creating intermediate tables as needed.
///
/// Returns whether the stored value changed.
///
/// # Errors
///
/// [`ConfigError::NotATable`] if an intermediate key already holds a
/// scalar value.
pub fn set(doc: &mut Mapping, parts: &[&str], value: Value) -> Result<bool, ConfigError> {
    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| ConfigError::InvalidKey(String::new()))?;

    let mut table = doc;
    for (i, part) in parents.iter().enumerate() {
        let child = table
            .entry(Value::from(*part))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        table = child
            .as_mapping_mut()
            .ok_or_else(|| ConfigError::NotATable(parts[..=i].join(".")))?;
    }

    let changed = table.get(*last) != Some(&value);
    table.insert(Value::from(*last), value);
    Ok(changed)
}

/// Remove the value at `parts`, returning it if it was present.
///
/// Parent tables left empty by the removal are removed as well.
pub fn remove(doc: &mut Mapping, parts: &[&str]) -> Option<Value> {
    match parts {
        [] => None,
        [key] => doc.remove(*key),
        [key, tail @ ..] => {
            let child = doc.get_mut(*key)?.as_mapping_mut()?;
            let removed = remove(child, tail)?;
            if child.is_empty() {
                doc.remove(*key);
            }
            Some(removed)
        }
    }
}
