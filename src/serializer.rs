//! Snapshot encoding. Defaults to JSON via serde_json.
//!
//! Implement [`Serializer`] to store snapshots in another format.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Converts catalog snapshots to/from bytes for persistence.
pub trait Serializer: Send + Sync {
    /// Encode a snapshot to bytes.
    fn serialize<T>(&self, data: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized;

    /// Decode bytes back into a snapshot.
    fn deserialize<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned;
}

/// JSON serializer. Pretty output uses two-space indentation and leaves
/// non-ASCII characters unescaped.
#[derive(Debug, Clone, Copy)]
pub struct JsonSerializer {
    pretty: bool,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::pretty()
    }
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented JSON, readable and diffable by hand.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Serializer for JsonSerializer {
    fn serialize<T>(&self, data: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(data)
        } else {
            serde_json::to_vec(data)
        }
        .map_err(|e| Error::Serialize(e.to_string()))?;
        if self.pretty {
            bytes.push(b'\n');
        }
        Ok(bytes)
    }

    fn deserialize<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(bytes).map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn pretty_is_indented_and_keeps_unicode() {
        let mut m = BTreeMap::new();
        m.insert("Amélie", "Jean-Pierre Jeunet");
        let out = JsonSerializer::pretty().serialize(&m).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n  \"Amélie\""));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn compact_is_single_line() {
        let mut m = BTreeMap::new();
        m.insert("a", 1);
        let out = JsonSerializer::compact().serialize(&m).unwrap();
        assert_eq!(out, b"{\"a\":1}");
    }

    #[test]
    fn truncated_input_is_a_deserialize_error() {
        let err = JsonSerializer::default()
            .deserialize::<BTreeMap<String, i32>>(b"{\"a\": 1")
            .unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)));
    }
}
