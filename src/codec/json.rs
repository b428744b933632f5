// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON codec.
//!
//! Maps between [`Value`] and the JSON data model through an explicit
//! conversion. Raw bytes have no JSON representation and fail encode; armor
//! them with `hex` (or keep them out of JSON channels) instead.

use crate::core::{CodecError, Record, Result, Value};

use super::Codec;

/// JSON codec for structured message data.
pub struct JsonCodec {
    _private: (),
}

impl JsonCodec {
    /// Create a new JSON codec.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &str {
        "json"
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let json = value_to_json(value)?;
        serde_json::to_vec(&json).map_err(|e| CodecError::encode("json", e.to_string()))
    }

    fn decode(&self, data: &[u8]) -> Result<Value> {
        let json: serde_json::Value =
            serde_json::from_slice(data).map_err(|e| CodecError::decode("json", e.to_string()))?;
        json_to_value(json)
    }
}

/// Convert a value to its JSON representation.
fn value_to_json(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::UInt(u) => serde_json::Value::Number((*u).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                CodecError::encode("json", format!("non-finite float {f} is not representable"))
            })?,
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(_) => {
            return Err(CodecError::encode(
                "json",
                "raw bytes are not representable in json",
            ))
        }
        Value::Array(items) => serde_json::Value::Array(
            items
                .iter()
                .map(value_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Struct(fields) => {
            let mut map = serde_json::Map::with_capacity(fields.len());
            for (key, val) in fields {
                map.insert(key.clone(), value_to_json(val)?);
            }
            serde_json::Value::Object(map)
        }
    })
}

/// Convert a JSON value to a decoded value.
fn json_to_value(json: serde_json::Value) -> Result<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                return Err(CodecError::decode("json", "unknown number format"));
            }
        }
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(json_to_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_json::Value::Object(map) => {
            let mut fields = Record::with_capacity(map.len());
            for (key, val) in map {
                fields.insert(key, json_to_value(val)?);
            }
            Value::Struct(fields)
        }
    })
}
