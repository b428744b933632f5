// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec capability: named bytes<->value transformations.
//!
//! This module provides the codec abstraction the serialization registry
//! consumes, and its built-in implementations:
//! - [`json`] - JSON structured encoding
//! - [`raw`] - identity passthrough for byte-shaped values
//! - [`hex`] - hexadecimal armor for binary payloads on text-only transports
//! - [`compress`] - zstd and lz4 byte transforms for chain tails
//!
//! ## Codec identifiers
//!
//! A [`CodecId`] is an opaque name resolved against a [`CodecRegistry`]. It
//! may be a compound chain such as `"json|zstd"`: segments are applied
//! left-to-right when encoding and right-to-left when decoding, so the chain
//! reads in wire order.
//!
//! ## Example
//!
//! ```
//! use streamcodec::codec::{global_codecs, CodecId};
//! use streamcodec::Value;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codecs = global_codecs();
//! let id = CodecId::from("json");
//! let bytes = codecs.dumps(Some(&id), &Value::Int(42))?;
//! assert_eq!(bytes, b"42");
//! assert_eq!(codecs.loads(Some(&id), &bytes)?, Value::Int(42));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use crate::coerce;
use crate::core::{CodecError, Result, Value};

pub mod compress;
pub mod hex;
pub mod json;
pub mod raw;

pub use compress::{Lz4Codec, ZstdCodec};
pub use hex::HexCodec;
pub use json::JsonCodec;
pub use raw::RawCodec;

/// Separator between segments of a compound codec identifier.
pub const CHAIN_SEPARATOR: char = '|';

// =============================================================================
// Codec Trait
// =============================================================================

/// A named bytes<->value transformation.
///
/// Codecs are stateless: both directions take `&self`, so one instance can be
/// shared by any number of threads.
pub trait Codec: Send + Sync {
    /// Get the codec name (e.g., "json", "zstd").
    fn name(&self) -> &str;

    /// Serialize a value to bytes.
    fn encode(&self, value: &Value) -> Result<Vec<u8>>;

    /// Deserialize bytes to a value.
    fn decode(&self, data: &[u8]) -> Result<Value>;
}

impl fmt::Debug for dyn Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec").field("name", &self.name()).finish()
    }
}

// =============================================================================
// Codec Identifier
// =============================================================================

/// Opaque codec identifier, possibly a compound `a|b|c` chain.
///
/// The identifier carries no behavior of its own; resolution is entirely the
/// registry's responsibility. An *absent* identifier (`None` at the call
/// sites that take `Option<&CodecId>`) means "no transformation".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodecId(String);

impl CodecId {
    /// Create a codec identifier.
    pub fn new(id: impl Into<String>) -> Self {
        CodecId(id.into())
    }

    /// The identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the segments of this identifier in encode order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(CHAIN_SEPARATOR).map(str::trim)
    }

    /// Check if this identifier is a chain of more than one codec.
    pub fn is_chain(&self) -> bool {
        self.0.contains(CHAIN_SEPARATOR)
    }
}

impl From<&str> for CodecId {
    fn from(id: &str) -> Self {
        CodecId(id.to_string())
    }
}

impl From<String> for CodecId {
    fn from(id: String) -> Self {
        CodecId(id)
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Codec Registry
// =============================================================================

/// Thread-safe registry of named codecs.
///
/// Uses RwLock for concurrent read access with exclusive write access.
/// Registration normally happens once at startup; decode/encode paths only
/// take the read lock.
pub struct CodecRegistry {
    codecs: RwLock<HashMap<String, Arc<dyn Codec>>>,
}

impl CodecRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            codecs: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry seeded with the built-in codecs
    /// (`json`, `raw`, `hex`, `zstd`, `lz4`).
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(JsonCodec::new()));
        registry.register(Arc::new(RawCodec::new()));
        registry.register(Arc::new(HexCodec::new()));
        registry.register(Arc::new(ZstdCodec::new()));
        registry.register(Arc::new(Lz4Codec::new()));
        registry
    }

    /// Register a codec under its own name, replacing any previous
    /// registration.
    pub fn register(&self, codec: Arc<dyn Codec>) {
        let name = codec.name().to_string();
        let previous = self.codecs.write().unwrap().insert(name.clone(), codec);
        if previous.is_some() {
            tracing::debug!(codec = %name, "replaced existing codec registration");
        }
    }

    /// Get a codec by name.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownCodec`] if the name is not registered.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Codec>> {
        self.codecs
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| CodecError::unknown_codec(name))
    }

    /// Check if a codec name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.codecs.read().unwrap().contains_key(name)
    }

    /// Get all registered codec names.
    pub fn names(&self) -> Vec<String> {
        self.codecs.read().unwrap().keys().cloned().collect()
    }

    /// Resolve a (possibly compound) identifier to its codec chain.
    pub fn resolve(&self, id: &CodecId) -> Result<Vec<Arc<dyn Codec>>> {
        id.segments().map(|name| self.get(name)).collect()
    }

    /// Serialize a value with the identified codec chain.
    ///
    /// With no codec, the value must already be byte-shaped and is returned
    /// as raw bytes.
    pub fn dumps(&self, codec: Option<&CodecId>, value: &Value) -> Result<Vec<u8>> {
        let Some(id) = codec else {
            return coerce::as_bytes(value.clone());
        };
        let chain = self.resolve(id)?;
        let mut bytes = chain[0].encode(value)?;
        for stage in &chain[1..] {
            bytes = stage.encode(&Value::Bytes(bytes))?;
        }
        Ok(bytes)
    }

    /// Deserialize bytes with the identified codec chain.
    ///
    /// With no codec, the bytes are returned untransformed as
    /// [`Value::Bytes`].
    pub fn loads(&self, codec: Option<&CodecId>, data: &[u8]) -> Result<Value> {
        let Some(id) = codec else {
            return Ok(Value::Bytes(data.to_vec()));
        };
        let chain = self.resolve(id)?;
        let mut value = Value::Bytes(data.to_vec());
        for stage in chain.iter().rev() {
            let bytes = coerce::as_bytes(value)?;
            value = stage.decode(&bytes)?;
        }
        Ok(value)
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Global Registry
// =============================================================================

/// Global codec registry, seeded with the built-in codecs.
///
/// This is a convenience singleton; for custom codec sets, create a
/// [`CodecRegistry`] instance directly and hand it to the serialization
/// registry at construction time.
static GLOBAL_CODECS: OnceLock<Arc<CodecRegistry>> = OnceLock::new();

/// Get the global codec registry.
pub fn global_codecs() -> Arc<CodecRegistry> {
    GLOBAL_CODECS
        .get_or_init(|| Arc::new(CodecRegistry::with_builtins()))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockCodec;

    impl Codec for MockCodec {
        fn name(&self) -> &str {
            "mock"
        }

        fn encode(&self, _value: &Value) -> Result<Vec<u8>> {
            Ok(b"mock".to_vec())
        }

        fn decode(&self, _data: &[u8]) -> Result<Value> {
            Ok(Value::Text("mock".into()))
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = CodecRegistry::new();
        registry.register(Arc::new(MockCodec));

        assert!(registry.contains("mock"));
        assert_eq!(registry.get("mock").unwrap().name(), "mock");
        assert!(registry.names().contains(&"mock".to_string()));
    }

    #[test]
    fn test_get_unknown_codec() {
        let registry = CodecRegistry::new();
        let err = registry.get("nope").unwrap_err();
        assert!(matches!(err, CodecError::UnknownCodec(_)));
    }

    #[test]
    fn test_chain_segments() {
        let id = CodecId::from("json|zstd");
        assert!(id.is_chain());
        assert_eq!(id.segments().collect::<Vec<_>>(), vec!["json", "zstd"]);

        let spaced = CodecId::from("json | lz4");
        assert_eq!(spaced.segments().collect::<Vec<_>>(), vec!["json", "lz4"]);
    }

    #[test]
    fn test_resolve_unknown_segment() {
        let registry = CodecRegistry::with_builtins();
        let err = registry.resolve(&CodecId::from("json|nope")).unwrap_err();
        assert!(matches!(err, CodecError::UnknownCodec(name) if name == "nope"));
    }

    #[test]
    fn test_dumps_loads_without_codec_is_identity() {
        let registry = CodecRegistry::new();
        let bytes = registry.dumps(None, &Value::Bytes(vec![1, 2, 3])).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
        assert_eq!(
            registry.loads(None, &bytes).unwrap(),
            Value::Bytes(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_dumps_without_codec_requires_byte_shape() {
        let registry = CodecRegistry::new();
        let err = registry.dumps(None, &Value::Array(vec![])).unwrap_err();
        assert!(matches!(err, CodecError::Coercion { .. }));
    }

    #[test]
    fn test_chain_round_trip_json_hex() {
        // json then hex armor: wire form is the hex rendering of the JSON text.
        let registry = CodecRegistry::with_builtins();
        let id = CodecId::from("json|hex");
        let bytes = registry.dumps(Some(&id), &Value::Int(7)).unwrap();
        assert_eq!(bytes, b"37".to_vec()); // "7" -> 0x37
        assert_eq!(registry.loads(Some(&id), &bytes).unwrap(), Value::Int(7));
    }

    #[test]
    fn test_global_registry_has_builtins() {
        let codecs = global_codecs();
        for name in ["json", "raw", "hex", "zstd", "lz4"] {
            assert!(codecs.contains(name), "missing builtin {name}");
        }
    }

    #[test]
    fn test_concurrent_access() {
        use std::thread;

        let registry = Arc::new(CodecRegistry::with_builtins());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        let _ = registry.get("json").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(registry.contains("json"));
    }
}
