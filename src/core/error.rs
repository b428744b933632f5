// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for streamcodec.
//!
//! Two layers of errors:
//! - [`CodecError`] - failures inside the codec, coercion, and model
//!   capabilities (encode, decode, unknown codec, shape coercion, model
//!   construction, resource limits)
//! - [`DecodeError`] - channel-classified decode failures produced by the
//!   serialization registry, distinguishing key-channel from value-channel
//!   errors by kind
//!
//! Resource-exhaustion conditions are a classification of their own: they are
//! process-health signals, and the registry re-raises them untouched instead
//! of reclassifying them as key or value decode errors.

use thiserror::Error;

/// Errors raised by the codec, coercion, and model capabilities.
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// Codec identifier not present in the codec registry.
    #[error("unknown codec: '{0}'")]
    UnknownCodec(String),

    /// Encoding a value to bytes failed.
    #[error("{codec} encode error: {message}")]
    Encode {
        /// Codec context (e.g., "json", "zstd")
        codec: String,
        /// Error message
        message: String,
    },

    /// Decoding bytes to a value failed.
    #[error("{codec} decode error: {message}")]
    Decode {
        /// Codec context (e.g., "json", "zstd")
        codec: String,
        /// Error message
        message: String,
    },

    /// A value has no representation in the requested shape.
    #[error("cannot represent {kind} as {target}")]
    Coercion {
        /// Kind of the value that was being coerced
        kind: &'static str,
        /// Requested target shape
        target: &'static str,
    },

    /// Constructing a model instance from a decoded primitive failed.
    #[error("failed to construct model '{tag}': {message}")]
    Construct {
        /// Type tag of the model being constructed
        tag: String,
        /// Error message
        message: String,
    },

    /// A decoded payload exceeded a configured resource ceiling.
    #[error("resource limit exceeded in {context}: needed {required} bytes, limit is {limit}")]
    ResourceExhausted {
        /// Where the limit was hit (codec name)
        context: String,
        /// Bytes the operation needed
        required: usize,
        /// Configured ceiling
        limit: usize,
    },
}

impl CodecError {
    /// Create an "unknown codec" error.
    pub fn unknown_codec(name: impl Into<String>) -> Self {
        CodecError::UnknownCodec(name.into())
    }

    /// Create an encode error.
    pub fn encode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::Encode {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::Decode {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a coercion error.
    pub fn coercion(kind: &'static str, target: &'static str) -> Self {
        CodecError::Coercion { kind, target }
    }

    /// Create a model construction error.
    pub fn construct(tag: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::Construct {
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// Create a resource exhaustion error.
    pub fn resource_exhausted(context: impl Into<String>, required: usize, limit: usize) -> Self {
        CodecError::ResourceExhausted {
            context: context.into(),
            required,
            limit,
        }
    }

    /// Check whether this error is a resource-exhaustion condition.
    ///
    /// Resource exhaustion is never reclassified by the decode wrappers;
    /// it propagates to the caller as-is.
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(self, CodecError::ResourceExhausted { .. })
    }
}

/// Channel-classified decode failures produced by the serialization registry.
///
/// Callers distinguish key-channel from value-channel failures by variant
/// alone, never by message parsing. Each variant preserves the original
/// failure's message and keeps the failure itself reachable through
/// [`std::error::Error::source`] for diagnostics.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Failure while decoding or coercing a message key.
    #[error("failed to decode key: {message}")]
    Key {
        /// Message of the original failure
        message: String,
        /// The original failure
        #[source]
        source: CodecError,
    },

    /// Failure while decoding or coercing a message value.
    #[error("failed to decode value: {message}")]
    Value {
        /// Message of the original failure
        message: String,
        /// The original failure
        #[source]
        source: CodecError,
    },

    /// Resource-exhaustion condition, re-raised untouched.
    #[error(transparent)]
    ResourceExhausted(CodecError),
}

impl DecodeError {
    /// Classify a codec failure on the key channel.
    pub fn key(source: CodecError) -> Self {
        if source.is_resource_exhaustion() {
            return DecodeError::ResourceExhausted(source);
        }
        DecodeError::Key {
            message: source.to_string(),
            source,
        }
    }

    /// Classify a codec failure on the value channel.
    pub fn value(source: CodecError) -> Self {
        if source.is_resource_exhaustion() {
            return DecodeError::ResourceExhausted(source);
        }
        DecodeError::Value {
            message: source.to_string(),
            source,
        }
    }

    /// Check if this is a key-channel decode failure.
    pub fn is_key(&self) -> bool {
        matches!(self, DecodeError::Key { .. })
    }

    /// Check if this is a value-channel decode failure.
    pub fn is_value(&self) -> bool {
        matches!(self, DecodeError::Value { .. })
    }

    /// Check if this is a resource-exhaustion passthrough.
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(self, DecodeError::ResourceExhausted(_))
    }
}

/// Result type for streamcodec capability operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_unknown_codec_display() {
        let err = CodecError::unknown_codec("yaml");
        assert_eq!(err.to_string(), "unknown codec: 'yaml'");
    }

    #[test]
    fn test_encode_error_display() {
        let err = CodecError::encode("json", "bad value");
        assert!(matches!(err, CodecError::Encode { .. }));
        assert_eq!(err.to_string(), "json encode error: bad value");
    }

    #[test]
    fn test_decode_error_display() {
        let err = CodecError::decode("zstd", "truncated frame");
        assert_eq!(err.to_string(), "zstd decode error: truncated frame");
    }

    #[test]
    fn test_coercion_error_display() {
        let err = CodecError::coercion("struct", "bytes");
        assert_eq!(err.to_string(), "cannot represent struct as bytes");
    }

    #[test]
    fn test_construct_error_display() {
        let err = CodecError::construct("orders.Order", "missing field");
        assert_eq!(
            err.to_string(),
            "failed to construct model 'orders.Order': missing field"
        );
    }

    #[test]
    fn test_resource_exhausted_display() {
        let err = CodecError::resource_exhausted("lz4", 1024, 512);
        assert!(err.is_resource_exhaustion());
        assert_eq!(
            err.to_string(),
            "resource limit exceeded in lz4: needed 1024 bytes, limit is 512"
        );
    }

    #[test]
    fn test_key_classification_wraps_and_preserves_message() {
        let inner = CodecError::decode("json", "expected value at line 1");
        let wrapped = DecodeError::key(inner);
        assert!(wrapped.is_key());
        assert!(!wrapped.is_value());
        assert_eq!(
            wrapped.to_string(),
            "failed to decode key: json decode error: expected value at line 1"
        );
        // Causal chain stays reachable for logs/tracing.
        let source = wrapped.source().expect("source preserved");
        assert_eq!(
            source.to_string(),
            "json decode error: expected value at line 1"
        );
    }

    #[test]
    fn test_value_classification() {
        let wrapped = DecodeError::value(CodecError::coercion("null", "text"));
        assert!(wrapped.is_value());
        assert!(!wrapped.is_key());
    }

    #[test]
    fn test_resource_exhaustion_is_not_reclassified() {
        let inner = CodecError::resource_exhausted("zstd", 10, 5);
        let key_side = DecodeError::key(inner.clone());
        let value_side = DecodeError::value(inner.clone());
        assert!(key_side.is_resource_exhaustion());
        assert!(value_side.is_resource_exhaustion());
        // The original error passes through with its message untouched.
        assert_eq!(key_side.to_string(), inner.to_string());
    }

    #[test]
    fn test_error_clone() {
        let err = CodecError::encode("json", "oops");
        assert_eq!(err.clone().to_string(), err.to_string());
    }
}
