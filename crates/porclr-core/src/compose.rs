//! Compose attribute lookup
//!
//! Finds the value of the first occurrence of a key anywhere in a Compose
//! document, in document order. Used by `scan` to read `container_name`.

use porclr_fs::{NormalizedPath, io};
use serde_yaml::Value;

use crate::{Error, Result};

/// Read `compose_file` and return the first scalar value stored under `key`.
///
/// Returns `Ok(None)` when the key does not occur.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML.
pub fn attribute_value(compose_file: &NormalizedPath, key: &str) -> Result<Option<String>> {
    let content = io::read_text(compose_file)?;
    find_attribute(&content, key).map_err(|message| Error::Compose {
        path: compose_file.to_native(),
        message,
    })
}

/// Like [`attribute_value`], operating on already-loaded text.
///
/// # Example
///
/// ```
/// use porclr_core::compose::find_attribute;
///
/// let compose = "services:\n  grocy:\n    container_name: grocy\n";
/// assert_eq!(find_attribute(compose, "container_name").unwrap().as_deref(), Some("grocy"));
/// ```
pub fn find_attribute(content: &str, key: &str) -> std::result::Result<Option<String>, String> {
    let document: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    Ok(search(&document, key))
}

fn search(value: &Value, key: &str) -> Option<String> {
    match value {
        Value::Mapping(mapping) => mapping.iter().find_map(|(k, v)| {
            if k.as_str() == Some(key)
                && let Some(scalar) = scalar_string(v)
            {
                return Some(scalar);
            }
            search(v, key)
        }),
        Value::Sequence(items) => items.iter().find_map(|item| search(item, key)),
        Value::Tagged(tagged) => search(&tagged.value, key),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
