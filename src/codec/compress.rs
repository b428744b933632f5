// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Compression codecs: zstd and lz4 byte transforms.
//!
//! Both operate on byte-shaped values and are meant as chain tails, e.g.
//! `"json|zstd"`. Both enforce a decoded-size ceiling; exceeding it is a
//! resource-exhaustion condition, which the serialization registry re-raises
//! untouched instead of classifying as a data error.

use crate::coerce;
use crate::core::{CodecError, Result, Value};

use super::Codec;

/// Default decoded-size ceiling for the compression codecs (64 MiB).
pub const DEFAULT_MAX_DECODED: usize = 64 * 1024 * 1024;

// =============================================================================
// Zstd
// =============================================================================

/// Zstandard compression codec.
pub struct ZstdCodec {
    level: i32,
    max_decoded: usize,
}

impl ZstdCodec {
    /// Default zstd compression level.
    pub const DEFAULT_LEVEL: i32 = 3;

    /// Create a zstd codec with the default level and decoded-size ceiling.
    pub fn new() -> Self {
        Self {
            level: Self::DEFAULT_LEVEL,
            max_decoded: DEFAULT_MAX_DECODED,
        }
    }

    /// Create a zstd codec with explicit level and decoded-size ceiling.
    pub fn with_limits(level: i32, max_decoded: usize) -> Self {
        Self { level, max_decoded }
    }
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for ZstdCodec {
    fn name(&self) -> &str {
        "zstd"
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let bytes = coerce::as_bytes(value.clone())?;
        zstd::stream::encode_all(bytes.as_slice(), self.level)
            .map_err(|e| CodecError::encode("zstd", e.to_string()))
    }

    fn decode(&self, data: &[u8]) -> Result<Value> {
        let decoded =
            zstd::stream::decode_all(data).map_err(|e| CodecError::decode("zstd", e.to_string()))?;
        if decoded.len() > self.max_decoded {
            return Err(CodecError::resource_exhausted(
                "zstd",
                decoded.len(),
                self.max_decoded,
            ));
        }
        Ok(Value::Bytes(decoded))
    }
}

// =============================================================================
// Lz4
// =============================================================================

/// LZ4 compression codec (block format, size-prepended).
pub struct Lz4Codec {
    max_decoded: usize,
}

impl Lz4Codec {
    /// Create an lz4 codec with the default decoded-size ceiling.
    pub fn new() -> Self {
        Self {
            max_decoded: DEFAULT_MAX_DECODED,
        }
    }

    /// Create an lz4 codec with an explicit decoded-size ceiling.
    pub fn with_limit(max_decoded: usize) -> Self {
        Self { max_decoded }
    }
}

impl Default for Lz4Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for Lz4Codec {
    fn name(&self) -> &str {
        "lz4"
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let bytes = coerce::as_bytes(value.clone())?;
        Ok(lz4_flex::compress_prepend_size(&bytes))
    }

    fn decode(&self, data: &[u8]) -> Result<Value> {
        // The block format prepends the uncompressed size as u32 LE; check it
        // against the ceiling before any allocation happens.
        if data.len() >= 4 {
            let declared = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
            if declared > self.max_decoded {
                return Err(CodecError::resource_exhausted(
                    "lz4",
                    declared,
                    self.max_decoded,
                ));
            }
        }
        lz4_flex::decompress_size_prepended(data)
            .map(Value::Bytes)
            .map_err(|e| CodecError::decode("lz4", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zstd_round_trip() {
        let codec = ZstdCodec::new();
        let payload = vec![7u8; 4096];
        let compressed = codec.encode(&Value::Bytes(payload.clone())).unwrap();
        assert!(compressed.len() < payload.len());
        assert_eq!(codec.decode(&compressed).unwrap(), Value::Bytes(payload));
    }

    #[test]
    fn test_lz4_round_trip() {
        let codec = Lz4Codec::new();
        let payload = b"abcabcabcabcabcabc".to_vec();
        let compressed = codec.encode(&Value::Bytes(payload.clone())).unwrap();
        assert_eq!(codec.decode(&compressed).unwrap(), Value::Bytes(payload));
    }

    #[test]
    fn test_zstd_ceiling_is_resource_exhaustion() {
        let tight = ZstdCodec::with_limits(ZstdCodec::DEFAULT_LEVEL, 16);
        let compressed = tight.encode(&Value::Bytes(vec![0u8; 1024])).unwrap();
        let err = tight.decode(&compressed).unwrap_err();
        assert!(err.is_resource_exhaustion());
    }

    #[test]
    fn test_lz4_ceiling_is_resource_exhaustion() {
        let tight = Lz4Codec::with_limit(16);
        let compressed = tight.encode(&Value::Bytes(vec![0u8; 1024])).unwrap();
        let err = tight.decode(&compressed).unwrap_err();
        assert!(err.is_resource_exhaustion());
    }

    #[test]
    fn test_lz4_truncated_frame() {
        let codec = Lz4Codec::new();
        let err = codec.decode(&[1, 0]).unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
    }

    #[test]
    fn test_text_payload_compresses() {
        let codec = ZstdCodec::new();
        let compressed = codec.encode(&Value::Text("hello hello".into())).unwrap();
        assert_eq!(
            codec.decode(&compressed).unwrap(),
            Value::Bytes(b"hello hello".to_vec())
        );
    }
}
