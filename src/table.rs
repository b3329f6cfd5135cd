//! Per-cycle lookup tables.
//!
//! Both tables are created empty at the start of a build cycle, filled in
//! processing order, and dropped with the cycle. Keys are kept sorted so the
//! rendered artifact does not depend on insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `source path -> public path`, append-only within a cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathTable(BTreeMap<String, String>);

impl PathTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, public: impl Into<String>) {
        self.0.insert(source.into(), public.into());
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.0.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Bytes served for one fingerprint.
///
/// Optional payloads are empty when they were not produced (development
/// mode, or a mime class that has no such variant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Brotli-compressed `data`.
    #[serde(rename = "br", with = "base64_bytes")]
    pub compressed: Vec<u8>,

    /// Transformed bytes; the fingerprint is computed over these.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,

    /// Lossless WebP re-encoding of a PNG.
    #[serde(rename = "webp", with = "base64_bytes")]
    pub alternate: Vec<u8>,

    pub mime: String,
}

/// `fingerprint -> payload`. Identical outputs share one entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetTable(BTreeMap<String, Payload>);

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a payload, replacing any previous entry for the fingerprint.
    pub fn insert(&mut self, fingerprint: impl Into<String>, payload: Payload) {
        self.0.insert(fingerprint.into(), payload);
    }

    pub fn get(&self, fingerprint: &str) -> Option<&Payload> {
        self.0.get(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Payload)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &Payload> {
        self.0.values()
    }
}

/// Serde adapter storing byte payloads as standard base64 strings.
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
