// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Streamcodec
//!
//! Type-directed serialization registry for stream-processing pipelines.
//!
//! This library converts raw transport bytes into typed values ("models") on
//! the consumer path and typed or raw values back into transport bytes on the
//! producer path, independently for the key and value channels of a message.
//!
//! ## Architecture
//!
//! The library is organized into capability modules:
//! - `core/` - value union, payload shapes, error taxonomy
//! - `codec/` - named bytes<->value transformations and the codec registry
//!   (JSON, raw, hex, zstd, lz4, compound `a|b` chains)
//! - `model/` - typed domain values, the tag-embedding convention, and the
//!   tag -> type registry for polymorphic channels
//! - `registry` - the [`SerializerRegistry`] tying the above together:
//!   codec precedence, tag-based reconstruction, target coercion, and
//!   channel-classified decode errors
//!
//! ## Example: value channel round trip
//!
//! ```
//! use streamcodec::{Payload, Record, SerializerRegistry, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SerializerRegistry::default();
//!
//! let mut fields = Record::new();
//! fields.insert("a".to_string(), Value::Int(1));
//! let encoded = registry
//!     .encode_value(Some(Payload::Value(Value::Struct(fields.clone()))), None)?
//!     .expect("value present");
//! assert_eq!(encoded, b"{\"a\":1}");
//!
//! let decoded = registry.decode_value(None, Some(Payload::Bytes(encoded)), None)?;
//! assert_eq!(decoded, Some(Payload::Value(Value::Struct(fields))));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error classification
//!
//! Decode failures carry their channel: [`DecodeError::Key`] vs
//! [`DecodeError::Value`], each preserving the original failure as its
//! source. Resource-exhaustion conditions pass through unwrapped, and encode
//! failures are never reclassified - they surface exactly as the codec or
//! coercion layer raised them.

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, DecodeError, Payload, PayloadKind, Record, Result, Value};

// Shape coercion helpers
pub mod coerce;

// Codec capability
pub mod codec;

pub use codec::{global_codecs, Codec, CodecId, CodecRegistry};

// Model capability
pub mod model;

pub use model::{global_models, Model, ModelRegistry, ModelType, NAMESPACE_FIELD};

// Serialization registry
pub mod registry;

pub use registry::{SerializerRegistry, TargetType, SKIP_BYTES};
