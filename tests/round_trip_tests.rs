// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Round-trip integration tests.
//!
//! Tests cover:
//! - Bit-exact float round trips, NaN payloads included
//! - Alignment and padding of a mixed-layout struct
//! - Truncation at every byte boundary
//! - Empty strings and sequences
//! - Encapsulation framing and JSON transcoding

mod common;

use common::{mixed_bytes, mixed_type, mixed_value, MIXED_PADDING};
use ros2cdr::encoding::cdr::{frame, unframe, CdrCalculator, CDR_HEADER_SIZE};
use ros2cdr::{
    CdrCodec, CdrMessage, CodecConfig, CodecFactory, CodecValue, DecodedMessage, Encoding,
    ErrorKind, FieldType, MessageCodec, MessageType, PrimitiveType, Twist, Vector3,
};
use std::sync::Arc;

// ============================================================================
// Float Bit Patterns
// ============================================================================

#[test]
fn test_vector3_nan_payload_round_trip() {
    let quiet = f64::from_bits(0x7FF8_0000_DEAD_BEEF);
    let signalling = f64::from_bits(0x7FF0_0000_0000_0001);
    let negative_zero = -0.0f64;
    let original = Vector3::new(quiet, signalling, negative_zero);

    let bytes = original.encode().expect("encode Vector3");
    assert_eq!(&bytes[0..8], &0x7FF8_0000_DEAD_BEEFu64.to_le_bytes());

    let decoded = Vector3::decode(&bytes).expect("decode Vector3");
    assert!(decoded.bit_eq(&original));
    assert_eq!(decoded.z.to_bits(), negative_zero.to_bits());
}

#[test]
fn test_twist_extreme_values_round_trip() {
    let original = Twist::new(
        Vector3::new(f64::MAX, f64::MIN_POSITIVE, f64::INFINITY),
        Vector3::new(f64::NEG_INFINITY, f64::EPSILON, f64::NAN),
    );

    let bytes = original.encode().expect("encode Twist");
    let decoded = Twist::decode(&bytes).expect("decode Twist");
    assert!(decoded.bit_eq(&original));
}

#[test]
fn test_float32_sequence_nan_payload_round_trip() {
    let ty = FieldType::sequence(FieldType::primitive(PrimitiveType::Float32));
    let payload = f32::from_bits(0x7FC0_1234);
    let value = CodecValue::Array(vec![
        CodecValue::Float32(payload),
        CodecValue::Float32(1.25),
    ]);

    let codec = CdrCodec::new();
    let bytes = codec.encode(&value, &ty).expect("encode");
    assert_eq!(bytes.len(), 12);

    let decoded = codec.decode(&bytes, &ty).expect("decode");
    assert!(decoded.bit_eq(&value));
}

// ============================================================================
// Mixed Layout
// ============================================================================

#[test]
fn test_mixed_layout_encoding() {
    let codec = CdrCodec::new();
    let bytes = codec.encode(&mixed_value(), &mixed_type()).expect("encode");

    assert_eq!(bytes, mixed_bytes());
    assert_eq!(bytes.len(), 41);
    for offset in MIXED_PADDING {
        assert_eq!(bytes[offset], 0, "padding byte at {offset}");
    }
}

#[test]
fn test_mixed_layout_decoding() {
    let codec = CdrCodec::new();
    let decoded = codec.decode(&mixed_bytes(), &mixed_type()).expect("decode");

    assert_eq!(decoded, mixed_value());
}

#[test]
fn test_mixed_layout_size_matches_encoding() {
    let size = CdrCalculator::message_size(&mixed_value(), &mixed_type(), 1024)
        .expect("calculate size");
    assert_eq!(size, mixed_bytes().len());
}

#[test]
fn test_mixed_layout_every_truncation_is_out_of_buffer() {
    let codec = CdrCodec::new();
    let ty = mixed_type();
    let bytes = mixed_bytes();

    for len in 0..bytes.len() {
        let err = codec
            .decode(&bytes[..len], &ty)
            .expect_err("truncated input should fail");
        assert_eq!(err.kind(), ErrorKind::OutOfBuffer, "truncated to {len} bytes");
    }
}

#[test]
fn test_nested_struct_alignment_is_payload_relative() {
    // uint8 followed by a Vector3: the nested float64s align to 8 from the
    // payload start, not from the nested struct.
    let vector3 = Arc::new(
        MessageType::new("geometry_msgs/msg/Vector3")
            .with_field("x", FieldType::primitive(PrimitiveType::Float64))
            .with_field("y", FieldType::primitive(PrimitiveType::Float64))
            .with_field("z", FieldType::primitive(PrimitiveType::Float64)),
    );
    let ty = FieldType::Struct(Arc::new(
        MessageType::new("test_msgs/msg/Tagged")
            .with_field("tag", FieldType::primitive(PrimitiveType::UInt8))
            .with_field("v", FieldType::Struct(vector3)),
    ));
    let value = CodecValue::Struct(
        DecodedMessage::new()
            .with("tag", 1u8)
            .with("v", Vector3::new(1.0, 2.0, 3.0).to_value()),
    );

    let bytes = CdrCodec::new().encode(&value, &ty).expect("encode");
    assert_eq!(bytes.len(), 32);
    assert!(bytes[1..8].iter().all(|&b| b == 0));
    assert_eq!(&bytes[8..16], &1.0f64.to_le_bytes());
}

// ============================================================================
// Empty Containers
// ============================================================================

#[test]
fn test_empty_string_and_sequence() {
    let ty = FieldType::Struct(Arc::new(
        MessageType::new("test_msgs/msg/Empty")
            .with_field("name", FieldType::String)
            .with_field(
                "data",
                FieldType::sequence(FieldType::primitive(PrimitiveType::Float64)),
            ),
    ));
    let value = CodecValue::Struct(
        DecodedMessage::new()
            .with("name", "")
            .with("data", CodecValue::Array(Vec::new())),
    );

    let codec = CdrCodec::new();
    let bytes = codec.encode(&value, &ty).expect("encode");
    assert_eq!(
        bytes,
        vec![0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );

    let decoded = codec.decode(&bytes, &ty).expect("decode");
    assert_eq!(decoded, value);
}

#[test]
fn test_fixed_array_length_mismatch_writes_nothing() {
    let ty = FieldType::array(FieldType::primitive(PrimitiveType::Int32), 3);
    let value = CodecValue::Array(vec![CodecValue::Int32(1), CodecValue::Int32(2)]);

    let err = CdrCodec::new().encode(&value, &ty).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthMismatch);
}

// ============================================================================
// Encapsulation
// ============================================================================

#[test]
fn test_framed_round_trip() {
    let codec = CdrCodec::with_config(CodecConfig {
        encapsulation: true,
        ..CodecConfig::default()
    });
    let original = Twist::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));

    let bytes = original.encode_with(&codec).expect("encode Twist");
    assert_eq!(bytes.len(), CDR_HEADER_SIZE + 48);
    assert_eq!(&bytes[..CDR_HEADER_SIZE], &[0x00, 0x01, 0x00, 0x00]);

    // The header does not shift alignment.
    let unframed = Twist::decode(&bytes[CDR_HEADER_SIZE..]).expect("decode payload");
    assert_eq!(unframed, original);

    let decoded = Twist::decode_with(&bytes, &codec).expect("decode framed");
    assert_eq!(decoded, original);
}

#[test]
fn test_unframe_rejects_big_endian() {
    let payload = [0x08, 0x00, 0x00, 0x00];
    let mut framed = frame(&payload);
    assert_eq!(unframe(&framed).expect("unframe"), &payload);

    framed[1] = 0x00;
    let err = unframe(&framed).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedEncapsulation);

    let err = unframe(&framed[..2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBuffer);
}

// ============================================================================
// JSON Transcoding
// ============================================================================

#[test]
fn test_json_cdr_transcode() {
    let factory = CodecFactory::default();
    let ty = factory
        .cdr()
        .schemas()
        .resolve("example_interfaces/srv/AddTwoInts_Request")
        .expect("resolve type");

    let cdr = factory
        .transcode(br#"{"a": 3, "b": 5}"#, &ty, Encoding::Json, Encoding::Cdr)
        .expect("json to cdr");
    assert_eq!(cdr, vec![0x03, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00]);

    let json = factory
        .transcode(&cdr, &ty, Encoding::Cdr, Encoding::Json)
        .expect("cdr to json");
    assert_eq!(String::from_utf8(json).expect("utf-8"), r#"{"a":3,"b":5}"#);
}

#[test]
fn test_json_mixed_layout_round_trip() {
    let factory = CodecFactory::default();
    let ty = mixed_type();

    let json = factory
        .transcode(&mixed_bytes(), &ty, Encoding::Cdr, Encoding::Json)
        .expect("cdr to json");
    let cdr = factory
        .transcode(&json, &ty, Encoding::Json, Encoding::Cdr)
        .expect("json to cdr");
    assert_eq!(cdr, mixed_bytes());
}
