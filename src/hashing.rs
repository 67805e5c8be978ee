//! Hashing System - SHA-256 for Rendered Markup
//!
//! Rendering is pure, so a digest of the markup identifies a tree's output.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

use crate::element::Markup;
use crate::schema::SchemaRegistry;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Digest of a node's rendered markup
pub fn markup_digest(node: &dyn Markup) -> String {
    sha256_hex(node.render().as_bytes())
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Fingerprint of every descriptor in a registry.
///
/// Two registries with the same names and rules fingerprint the same,
/// regardless of registration order.
pub fn registry_fingerprint(registry: &SchemaRegistry) -> Result<String, serde_json::Error> {
    let entries: serde_json::Map<String, Value> = registry
        .list()
        .into_iter()
        .map(|(name, descriptor)| {
            serde_json::to_value(descriptor).map(|value| (name.to_string(), value))
        })
        .collect::<Result<_, serde_json::Error>>()?;
    let canonical = canonical_json(&entries)?;
    Ok(sha256_hex(canonical.as_bytes()))
}
