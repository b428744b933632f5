// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec chain integration tests.
//!
//! Tests cover:
//! - Compound codec chains through the codec registry and through the
//!   serialization registry's channels
//! - Compression ceilings surfacing as resource exhaustion end to end
//! - Custom codec registration used as a per-call override

use std::sync::Arc;

use streamcodec::codec::{Lz4Codec, ZstdCodec};
use streamcodec::{
    global_codecs, Codec, CodecId, CodecRegistry, ModelRegistry, Payload, Record,
    SerializerRegistry, Value,
};

fn sample_record() -> Value {
    let mut fields = Record::new();
    fields.insert("topic".to_string(), Value::Text("orders".into()));
    fields.insert("partition".to_string(), Value::Int(3));
    fields.insert(
        "tags".to_string(),
        Value::Array(vec![Value::Text("eu".into()), Value::Text("prio".into())]),
    );
    Value::Struct(fields)
}

#[test]
fn test_compressed_chain_round_trip() {
    let codecs = global_codecs();
    let value = sample_record();

    for chain in ["json|zstd", "json|lz4", "json|hex"] {
        let id = CodecId::from(chain);
        let bytes = codecs.dumps(Some(&id), &value).unwrap();
        assert_eq!(codecs.loads(Some(&id), &bytes).unwrap(), value, "chain {chain}");
    }
}

#[test]
fn test_three_stage_chain() {
    let codecs = global_codecs();
    let id = CodecId::from("json|zstd|hex");
    let value = sample_record();

    let bytes = codecs.dumps(Some(&id), &value).unwrap();
    // Outermost stage is hex, so the wire form is pure hex text.
    assert!(bytes.iter().all(u8::is_ascii_hexdigit));
    assert_eq!(codecs.loads(Some(&id), &bytes).unwrap(), value);
}

#[test]
fn test_compressed_value_channel_round_trip() {
    let registry = SerializerRegistry::new(None, Some(CodecId::from("json|zstd")))
        .with_models(Arc::new(ModelRegistry::new()));
    let value = sample_record();

    let encoded = registry
        .encode_value(Some(Payload::Value(value.clone())), None)
        .unwrap()
        .unwrap();
    let decoded = registry
        .decode_value(None, Some(Payload::Bytes(encoded)), None)
        .unwrap();
    assert_eq!(decoded, Some(Payload::Value(value)));
}

#[test]
fn test_compression_ceiling_surfaces_as_resource_exhaustion() {
    // Channel codecs with a deliberately tiny decode ceiling.
    for tight in [
        Arc::new(ZstdCodec::with_limits(ZstdCodec::DEFAULT_LEVEL, 8)) as Arc<dyn Codec>,
        Arc::new(Lz4Codec::with_limit(8)) as Arc<dyn Codec>,
    ] {
        let name = tight.name().to_string();
        let codecs = CodecRegistry::with_builtins();
        codecs.register(tight);

        let registry = SerializerRegistry::with_codecs(
            None,
            Some(CodecId::from(name.clone())),
            Arc::new(codecs),
        )
        .with_models(Arc::new(ModelRegistry::new()));

        let encoded = registry
            .encode_value(Some(Payload::Value(Value::Text("x".repeat(512)))), None)
            .unwrap()
            .unwrap();
        let err = registry
            .decode_value(None, Some(Payload::Bytes(encoded)), None)
            .unwrap_err();
        assert!(err.is_resource_exhaustion(), "codec {name}");
        assert!(!err.is_value(), "codec {name}");
    }
}

#[test]
fn test_custom_codec_as_per_call_override() {
    /// Codec that reverses the byte order, as a stand-in for an
    /// application-provided transform.
    struct ReverseCodec;

    impl Codec for ReverseCodec {
        fn name(&self) -> &str {
            "reverse"
        }

        fn encode(&self, value: &Value) -> streamcodec::Result<Vec<u8>> {
            let Value::Text(s) = value else {
                return Err(streamcodec::CodecError::encode("reverse", "expected text"));
            };
            Ok(s.bytes().rev().collect())
        }

        fn decode(&self, data: &[u8]) -> streamcodec::Result<Value> {
            let text = data.iter().rev().map(|b| *b as char).collect::<String>();
            Ok(Value::Text(text))
        }
    }

    let codecs = CodecRegistry::with_builtins();
    codecs.register(Arc::new(ReverseCodec));
    let registry =
        SerializerRegistry::with_codecs(None, Some(CodecId::from("json")), Arc::new(codecs))
            .with_models(Arc::new(ModelRegistry::new()));

    let reverse = CodecId::from("reverse");
    let encoded = registry
        .encode_value(Some(Payload::Value(Value::Text("abc".into()))), Some(&reverse))
        .unwrap()
        .unwrap();
    assert_eq!(encoded, b"cba".to_vec());

    let decoded = registry
        .decode_value(None, Some(Payload::Bytes(encoded)), Some(&reverse))
        .unwrap();
    assert_eq!(decoded, Some(Payload::Bytes(b"abc".to_vec())));
}

#[test]
fn test_raw_value_channel() {
    let registry = SerializerRegistry::new(None, Some(CodecId::from("raw")))
        .with_models(Arc::new(ModelRegistry::new()));

    let encoded = registry
        .encode_value(Some(Payload::Value(Value::Text("plain".into()))), None)
        .unwrap()
        .unwrap();
    assert_eq!(encoded, b"plain".to_vec());

    let decoded = registry
        .decode_value(None, Some(Payload::Bytes(encoded)), None)
        .unwrap();
    assert_eq!(decoded, Some(Payload::Bytes(b"plain".to_vec())));
}
