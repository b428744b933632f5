// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type-directed serialization registry for message key and value channels.
//!
//! [`SerializerRegistry`] converts raw transport bytes into typed values on
//! the consumer path and typed/raw values back into transport bytes on the
//! producer path. It centralizes codec selection (per-call override,
//! per-type declared codec, channel default, raw passthrough) and classifies
//! decode failures by channel so callers can apply different recovery
//! policies to keys and values.
//!
//! Each operation is a pure function of the registry's defaults and its
//! arguments; the registry is safe to share across threads.
//!
//! ## Example
//!
//! ```
//! use streamcodec::{Payload, SerializerRegistry, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Keys pass through raw, values default to json.
//! let registry = SerializerRegistry::default();
//!
//! let encoded = registry
//!     .encode_value(Some(Payload::Value(Value::Text("hi".into()))), None)?
//!     .expect("value present");
//! assert_eq!(encoded, b"\"hi\"");
//!
//! let decoded = registry.decode_value(None, Some(Payload::Bytes(encoded)), None)?;
//! assert_eq!(decoded, Some(Payload::Bytes(b"hi".to_vec())));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::codec::{self, CodecId, CodecRegistry};
use crate::coerce;
use crate::core::{CodecError, DecodeError, Payload, PayloadKind, Value};
use crate::model::{self, ModelRegistry, ModelType};

/// Default skip set for the encode operations: raw bytes are assumed
/// pre-serialized and pass through unchanged.
pub const SKIP_BYTES: &[PayloadKind] = &[PayloadKind::Bytes];

/// Target shape for a decode operation.
///
/// Absence of a target (`None` at the call sites) means "no coercion" on the
/// key channel; the value channel defaults to [`TargetType::Bytes`].
#[derive(Debug, Clone)]
pub enum TargetType {
    /// Coerce the decoded value to text.
    Text,
    /// Coerce the decoded value to raw bytes.
    Bytes,
    /// Construct the given model type from the decoded primitive.
    Model(Arc<dyn ModelType>),
}

static VALUE_DEFAULT_TARGET: TargetType = TargetType::Bytes;

/// Serialization registry for the key and value channels of a message.
///
/// Constructed once at application start with the two channel defaults and
/// never mutated afterwards; the reference to the model capability is
/// resolved lazily on first use to keep registry construction independent of
/// model registration order.
pub struct SerializerRegistry {
    key_codec: Option<CodecId>,
    value_codec: Option<CodecId>,
    codecs: Arc<CodecRegistry>,
    models: OnceLock<Arc<ModelRegistry>>,
}

impl SerializerRegistry {
    /// Create a registry with the given channel defaults, using the global
    /// codec registry.
    ///
    /// `None` for a channel means "raw bytes, no transform" on that channel.
    pub fn new(key_codec: Option<CodecId>, value_codec: Option<CodecId>) -> Self {
        Self::with_codecs(key_codec, value_codec, codec::global_codecs())
    }

    /// Create a registry backed by a specific codec registry.
    pub fn with_codecs(
        key_codec: Option<CodecId>,
        value_codec: Option<CodecId>,
        codecs: Arc<CodecRegistry>,
    ) -> Self {
        Self {
            key_codec,
            value_codec,
            codecs,
            models: OnceLock::new(),
        }
    }

    /// Use a specific model registry instead of the lazily resolved global
    /// one.
    pub fn with_models(self, models: Arc<ModelRegistry>) -> Self {
        let _ = self.models.set(models);
        self
    }

    /// Default codec of the key channel.
    pub fn key_codec(&self) -> Option<&CodecId> {
        self.key_codec.as_ref()
    }

    /// Default codec of the value channel.
    pub fn value_codec(&self) -> Option<&CodecId> {
        self.value_codec.as_ref()
    }

    /// The codec registry backing this registry.
    pub fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    /// The model registry backing this registry.
    ///
    /// Resolved from the global model registry on first use and memoized for
    /// the registry's lifetime. The lookup is pure, so racing first uses are
    /// harmless.
    pub fn models(&self) -> &ModelRegistry {
        self.models.get_or_init(model::global_models).as_ref()
    }

    // =========================================================================
    // Decode
    // =========================================================================

    /// Deserialize a message key.
    ///
    /// # Arguments
    ///
    /// * `typ` - Target shape for the decoded key; `None` means no coercion
    /// * `key` - Serialized key, or a pre-decoded model instance
    /// * `codec` - Per-call codec, taking precedence over the key channel
    ///   default
    ///
    /// # Errors
    ///
    /// Any failure is classified as [`DecodeError::Key`], except
    /// resource-exhaustion conditions which propagate untouched.
    pub fn decode_key(
        &self,
        typ: Option<&TargetType>,
        key: Option<Payload>,
        codec: Option<&CodecId>,
    ) -> Result<Option<Payload>, DecodeError> {
        let Some(key) = key else {
            return Ok(None);
        };
        let codec = codec.or(self.key_codec.as_ref());
        let result = if key.is_model() {
            self.decode_model(typ, codec, key)
        } else {
            self.decode_plain(typ, key, codec)
        };
        result.map(Some).map_err(DecodeError::key)
    }

    /// Deserialize a message value.
    ///
    /// Same contract as [`decode_key`](Self::decode_key), with two
    /// differences: an unspecified `typ` defaults to [`TargetType::Bytes`]
    /// for non-model inputs, and failures are classified as
    /// [`DecodeError::Value`]. A `None` input is a tombstone and
    /// short-circuits to `Ok(None)` before any codec or coercion work.
    pub fn decode_value(
        &self,
        typ: Option<&TargetType>,
        value: Option<Payload>,
        codec: Option<&CodecId>,
    ) -> Result<Option<Payload>, DecodeError> {
        let Some(value) = value else {
            return Ok(None);
        };
        let codec = codec.or(self.value_codec.as_ref());
        let result = if value.is_model() {
            self.decode_model(typ, codec, value)
        } else {
            let typ = typ.or(Some(&VALUE_DEFAULT_TARGET));
            self.decode_plain(typ, value, codec)
        };
        result.map(Some).map_err(DecodeError::value)
    }

    /// Decode a non-model input: bytes through the codec, tag-based
    /// reconstruction, then target coercion.
    fn decode_plain(
        &self,
        typ: Option<&TargetType>,
        data: Payload,
        codec: Option<&CodecId>,
    ) -> Result<Payload, CodecError> {
        let raw = coerce::payload_bytes(data)?;
        let decoded = self.codecs.loads(codec, &raw)?;

        // A recognized embedded tag wins over the requested target: the
        // concrete type that produced the data is rehydrated and no further
        // coercion applies.
        if let Some(tagged) = self.models().maybe_namespace(&decoded) {
            return tagged.construct(decoded).map(Payload::Model);
        }

        match typ {
            None => Ok(Payload::Value(decoded)),
            Some(TargetType::Text) => {
                coerce::as_text(&decoded).map(|s| Payload::Value(Value::Text(s)))
            }
            // Byte-shaped values come back as raw bytes; anything else has no
            // byte form and is handed back untouched.
            Some(TargetType::Bytes) => Ok(match decoded {
                Value::Bytes(b) => Payload::Bytes(b),
                Value::Text(s) => Payload::Bytes(s.into_bytes()),
                other => Payload::Value(other),
            }),
            Some(TargetType::Model(target)) => target.construct(decoded).map(Payload::Model),
        }
    }

    /// Reconstruct a model from pre-decoded or encoded data.
    ///
    /// The target type's declared codec beats the caller's codec. A
    /// pre-decoded model contributes its primitive representation in place of
    /// the codec output. The decoded primitive's recognized tag instantiates
    /// that concrete type - the one path where a foreign tag overrides the
    /// requested target - otherwise the target type is constructed directly.
    fn decode_model(
        &self,
        typ: Option<&TargetType>,
        codec: Option<&CodecId>,
        data: Payload,
    ) -> Result<Payload, CodecError> {
        let target = match typ {
            Some(TargetType::Model(target)) => Some(target),
            _ => None,
        };
        let effective = target.and_then(|t| t.codec()).or(codec);
        let primitive = match data {
            Payload::Bytes(b) => self.codecs.loads(effective, &b)?,
            Payload::Model(m) => m.to_value(),
            Payload::Value(v) => v,
        };
        if let Some(tagged) = self.models().maybe_namespace(&primitive) {
            return tagged.construct(primitive).map(Payload::Model);
        }
        match target {
            Some(target) => target.construct(primitive).map(Payload::Model),
            None => Ok(Payload::Value(primitive)),
        }
    }

    // =========================================================================
    // Encode
    // =========================================================================

    /// Serialize a message key, skipping raw bytes.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to serialize
    /// * `codec` - Accepted for parity with
    ///   [`encode_value`](Self::encode_value) but never consulted: the key
    ///   channel resolves its codec from the registry default alone, with a
    ///   model key's declared codec taking precedence
    ///
    /// # Errors
    ///
    /// Encode failures propagate unmodified; they are never reclassified as
    /// decode errors.
    pub fn encode_key(
        &self,
        key: Option<Payload>,
        codec: Option<&CodecId>,
    ) -> Result<Option<Vec<u8>>, CodecError> {
        self.encode_key_with(key, codec, SKIP_BYTES)
    }

    /// Serialize a message key with an explicit skip set.
    ///
    /// Shapes in `skip` bypass the codec and pass through as raw bytes.
    pub fn encode_key_with(
        &self,
        key: Option<Payload>,
        codec: Option<&CodecId>,
        skip: &[PayloadKind],
    ) -> Result<Option<Vec<u8>>, CodecError> {
        let _ = codec;
        let Some(key) = key else {
            return Ok(None);
        };
        let effective = match &key {
            Payload::Model(m) => m.codec().or(self.key_codec.as_ref()).cloned(),
            _ => self.key_codec.clone(),
        };
        self.encode_payload(key, effective, skip)
    }

    /// Serialize a message value, skipping raw bytes.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to serialize
    /// * `codec` - Per-call codec, taking precedence over the value channel
    ///   default for non-model values; a model value's declared codec beats
    ///   both
    ///
    /// # Errors
    ///
    /// Encode failures propagate unmodified.
    pub fn encode_value(
        &self,
        value: Option<Payload>,
        codec: Option<&CodecId>,
    ) -> Result<Option<Vec<u8>>, CodecError> {
        self.encode_value_with(value, codec, SKIP_BYTES)
    }

    /// Serialize a message value with an explicit skip set.
    pub fn encode_value_with(
        &self,
        value: Option<Payload>,
        codec: Option<&CodecId>,
        skip: &[PayloadKind],
    ) -> Result<Option<Vec<u8>>, CodecError> {
        let Some(value) = value else {
            return Ok(None);
        };
        let effective = match &value {
            Payload::Model(m) => m.codec().or(codec).or(self.value_codec.as_ref()).cloned(),
            _ => codec.or(self.value_codec.as_ref()).cloned(),
        };
        self.encode_payload(value, effective, skip)
    }

    /// Shared encode tail: apply the resolved codec unless the payload's
    /// shape is in the skip set, else pass through as raw bytes.
    fn encode_payload(
        &self,
        payload: Payload,
        codec: Option<CodecId>,
        skip: &[PayloadKind],
    ) -> Result<Option<Vec<u8>>, CodecError> {
        if let Some(codec) = codec.filter(|_| !skip.contains(&payload.kind())) {
            let encoded = match payload {
                Payload::Model(m) => m.dumps(Some(&codec), &self.codecs)?,
                Payload::Value(v) => self.codecs.dumps(Some(&codec), &v)?,
                Payload::Bytes(b) => self.codecs.dumps(Some(&codec), &Value::Bytes(b))?,
            };
            return Ok(Some(encoded));
        }
        coerce::payload_bytes(payload).map(Some)
    }
}

impl Default for SerializerRegistry {
    /// Raw keys, json values.
    fn default() -> Self {
        Self::new(None, Some(CodecId::from("json")))
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("key_codec", &self.key_codec)
            .field("value_codec", &self.value_codec)
            .finish_non_exhaustive()
    }
}
