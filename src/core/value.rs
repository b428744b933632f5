// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Value type system for decoded message data.
//!
//! Provides a unified representation for data decoded from any codec, and the
//! [`Payload`] union describing the three runtime shapes a key or value can
//! take on its way through the serialization registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::model::Model;

/// Type alias for a decoded record as field name -> value mapping.
pub type Record = HashMap<String, Value>;

/// Unified value type for decoded message data.
///
/// This enum represents primitives produced by a codec's decode step. It is
/// serde-serializable and compares structurally, which is what the registry's
/// round-trip guarantees are stated in terms of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    // Null / tombstone field
    Null,

    // Boolean
    Bool(bool),

    // Signed integer
    Int(i64),

    // Unsigned integer (used when a number does not fit in i64)
    UInt(u64),

    // Floating point
    Float(f64),

    // Text (UTF-8)
    Text(String),

    // Binary data (pre-serialized payloads, compressed frames)
    Bytes(Vec<u8>),

    // Array of values
    Array(Vec<Value>),

    // Nested record
    Struct(Record),
}

impl Value {
    /// Name of this value's kind, for diagnostics and coercion errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
        }
    }

    /// Check if this value is a numeric type (integer or float).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_) | Value::Float(_))
    }

    /// Check if this value is text.
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Check if this value is binary data.
    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    /// Check if this value is a container type (array or struct).
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Struct(_))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

// =============================================================================
// Payload
// =============================================================================

/// The three runtime shapes of a message key or value.
///
/// The registry's decision tree dispatches on exactly these branches instead
/// of inspecting types at runtime:
///
/// - [`Payload::Bytes`] - raw transport bytes, or a pre-serialized payload
///   that encode must pass through unchanged
/// - [`Payload::Model`] - a typed domain value
/// - [`Payload::Value`] - a decoded primitive that is not (or not yet) a model
#[derive(Debug)]
pub enum Payload {
    /// Raw bytes in final transport form.
    Bytes(Vec<u8>),
    /// Typed domain value.
    Model(Box<dyn Model>),
    /// Decoded primitive.
    Value(Value),
}

/// Discriminant of a [`Payload`], used for encode skip sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// Raw bytes
    Bytes,
    /// Model instance
    Model,
    /// Decoded primitive
    Value,
}

impl Payload {
    /// Get this payload's shape discriminant.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Bytes(_) => PayloadKind::Bytes,
            Payload::Model(_) => PayloadKind::Model,
            Payload::Value(_) => PayloadKind::Value,
        }
    }

    /// Check if this payload is a model instance.
    pub fn is_model(&self) -> bool {
        matches!(self, Payload::Model(_))
    }

    /// Check if this payload is raw bytes.
    pub fn is_bytes(&self) -> bool {
        matches!(self, Payload::Bytes(_))
    }

    /// Wrap a model instance.
    pub fn model(model: impl Model + 'static) -> Self {
        Payload::Model(Box::new(model))
    }
}

impl PartialEq for Payload {
    /// Structural equality: model instances compare by tag and primitive
    /// representation, not identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Bytes(a), Payload::Bytes(b)) => a == b,
            (Payload::Value(a), Payload::Value(b)) => a == b,
            (Payload::Model(a), Payload::Model(b)) => {
                a.tag() == b.tag() && a.to_value() == b.to_value()
            }
            _ => false,
        }
    }
}

impl From<Value> for Payload {
    fn from(v: Value) -> Self {
        Payload::Value(v)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(v: Vec<u8>) -> Self {
        Payload::Bytes(v)
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKind::Bytes => write!(f, "bytes"),
            PayloadKind::Model => write!(f, "model"),
            PayloadKind::Value => write!(f, "value"),
        }
    }
}
