// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Raw codec: identity transform for byte-shaped values.

use crate::coerce;
use crate::core::{Result, Value};

use super::Codec;

/// Identity codec for values that are already in wire form.
///
/// Encode accepts anything with a byte representation; decode hands the bytes
/// back untouched.
pub struct RawCodec {
    _private: (),
}

impl RawCodec {
    /// Create a new raw codec.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for RawCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for RawCodec {
    fn name(&self) -> &str {
        "raw"
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        coerce::as_bytes(value.clone())
    }

    fn decode(&self, data: &[u8]) -> Result<Value> {
        Ok(Value::Bytes(data.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CodecError;

    #[test]
    fn test_identity() {
        let codec = RawCodec::new();
        let bytes = codec.encode(&Value::Bytes(vec![1, 2, 3])).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
        assert_eq!(codec.decode(&bytes).unwrap(), Value::Bytes(vec![1, 2, 3]));
    }

    #[test]
    fn test_text_encodes_to_utf8() {
        let codec = RawCodec::new();
        assert_eq!(codec.encode(&Value::Text("hi".into())).unwrap(), b"hi");
    }

    #[test]
    fn test_container_rejected() {
        let codec = RawCodec::new();
        let err = codec.encode(&Value::Array(vec![])).unwrap_err();
        assert!(matches!(err, CodecError::Coercion { .. }));
    }
}
