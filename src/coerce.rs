// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shape coercion helpers.
//!
//! Enforce "must be text" / "must be raw bytes" at the registry boundary.
//! Scalars render to their display representation; null and containers have
//! no representation in either shape and fail with a coercion error.

use crate::core::{CodecError, Payload, Result, Value};

/// Coerce a decoded value to text.
pub fn as_text(value: &Value) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Bytes(b) => String::from_utf8(b.clone())
            .map_err(|_| CodecError::coercion("bytes", "text")),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::UInt(u) => Ok(u.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        other => Err(CodecError::coercion(other.kind_name(), "text")),
    }
}

/// Coerce a value to raw bytes.
pub fn as_bytes(value: Value) -> Result<Vec<u8>> {
    match value {
        Value::Bytes(b) => Ok(b),
        Value::Text(s) => Ok(s.into_bytes()),
        Value::Bool(b) => Ok(b.to_string().into_bytes()),
        Value::Int(i) => Ok(i.to_string().into_bytes()),
        Value::UInt(u) => Ok(u.to_string().into_bytes()),
        Value::Float(f) => Ok(f.to_string().into_bytes()),
        other => Err(CodecError::coercion(other.kind_name(), "bytes")),
    }
}

/// Coerce a payload to raw bytes for transport passthrough.
///
/// Model instances have no byte form without a codec and cannot be passed
/// through.
pub fn payload_bytes(payload: Payload) -> Result<Vec<u8>> {
    match payload {
        Payload::Bytes(b) => Ok(b),
        Payload::Value(v) => as_bytes(v),
        Payload::Model(_) => Err(CodecError::coercion("model", "bytes")),
    }
}
