// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Hex codec: lowercase hexadecimal armor for binary payloads.
//!
//! Useful as a chain tail when a transport or log pipeline only tolerates
//! text, e.g. `"json|hex"`.

use crate::coerce;
use crate::core::{CodecError, Result, Value};

use super::Codec;

/// Hexadecimal armor codec.
pub struct HexCodec {
    _private: (),
}

impl HexCodec {
    /// Create a new hex codec.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for HexCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for HexCodec {
    fn name(&self) -> &str {
        "hex"
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let bytes = coerce::as_bytes(value.clone())?;
        Ok(hex::encode(bytes).into_bytes())
    }

    fn decode(&self, data: &[u8]) -> Result<Value> {
        hex::decode(data)
            .map(Value::Bytes)
            .map_err(|e| CodecError::decode("hex", e.to_string()))
    }
}
