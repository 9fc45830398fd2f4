// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR encoding and decoding tests for the builtin ROS 2 types.

use ros2cdr::encoding::cdr::{CdrCursor, CdrEncoder};
use ros2cdr::{
    AddTwoIntsRequest, AddTwoIntsResponse, CdrCodec, CdrMessage, CodecConfig, CodecError,
    ErrorKind, IntWidth, MessageCodec, Twist, Vector3,
};

// ============================================================================
// CDR Cursor Reading Tests
// ============================================================================

#[test]
fn test_cdr_cursor_read_u32() {
    let data: Vec<u8> = vec![0x34, 0x12, 0x00, 0x00];

    let mut cursor = CdrCursor::new(&data);
    let value = cursor.read_u32().expect("read u32");
    assert_eq!(value, 4660);
    assert!(cursor.is_at_end());
}

#[test]
fn test_cdr_cursor_read_f64_after_padding() {
    let mut data = vec![0x2A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    data.extend_from_slice(&1.5f64.to_le_bytes());

    let mut cursor = CdrCursor::new(&data);
    assert_eq!(cursor.read_u8().expect("read u8"), 0x2A);
    let value = cursor.read_f64().expect("read f64");
    assert_eq!(value, 1.5);
    assert_eq!(cursor.position(), 16);
}

#[test]
fn test_cdr_cursor_read_string() {
    let data = [0x04, 0x00, 0x00, 0x00, b'a', b'b', b'c', 0x00];

    let mut cursor = CdrCursor::new(&data);
    assert_eq!(cursor.read_string().expect("read string"), "abc");
    assert!(cursor.is_at_end());
}

#[test]
fn test_cdr_cursor_string_errors() {
    let zero_prefix = [0x00, 0x00, 0x00, 0x00];
    let err = CdrCursor::new(&zero_prefix).read_string().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingTerminator);

    let no_terminator = [0x02, 0x00, 0x00, 0x00, b'a', b'b'];
    let err = CdrCursor::new(&no_terminator).read_string().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingTerminator);

    let bad_utf8 = [0x02, 0x00, 0x00, 0x00, 0xFF, 0x00];
    let err = CdrCursor::new(&bad_utf8).read_string().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
}

#[test]
fn test_cdr_cursor_invalid_bool() {
    let data = [0x02];
    let err = CdrCursor::new(&data).read_bool().unwrap_err();
    assert_eq!(
        err,
        CodecError::InvalidBoolValue {
            value: 2,
            position: 0
        }
    );
}

// ============================================================================
// CDR Encoder Writing Tests
// ============================================================================

#[test]
fn test_cdr_encoder_write_u32() {
    let mut encoder = CdrEncoder::new();
    encoder.uint32(4660);

    let data = encoder.finish();
    assert_eq!(data, vec![0x34, 0x12, 0x00, 0x00]);
}

#[test]
fn test_cdr_encoder_pads_with_zeros() {
    let mut encoder = CdrEncoder::new();
    encoder.uint8(0xFF).int64(-1);

    let data = encoder.finish();
    assert_eq!(data.len(), 16);
    assert!(data[1..8].iter().all(|&b| b == 0));
    assert!(data[8..].iter().all(|&b| b == 0xFF));
}

#[test]
fn test_cdr_encoder_string_has_no_trailing_padding() {
    let mut encoder = CdrEncoder::new();
    encoder.string("hi").expect("write string");

    assert_eq!(encoder.finish(), vec![0x03, 0x00, 0x00, 0x00, b'h', b'i', 0x00]);
}

// ============================================================================
// geometry_msgs Tests
// ============================================================================

#[test]
fn test_vector3_encoding() {
    let bytes = Vector3::new(1.0, 2.0, 3.0).encode().expect("encode Vector3");

    assert_eq!(bytes.len(), 24);
    assert_eq!(&bytes[0..8], &1.0f64.to_le_bytes());
    assert_eq!(&bytes[8..16], &2.0f64.to_le_bytes());
    assert_eq!(&bytes[16..24], &3.0f64.to_le_bytes());
}

#[test]
fn test_twist_encoding() {
    let twist = Twist::new(Vector3::new(0.5, 0.0, 0.0), Vector3::new(0.0, 0.0, -0.25));
    let bytes = twist.encode().expect("encode Twist");

    assert_eq!(bytes.len(), 48);
    assert_eq!(&bytes[0..8], &0.5f64.to_le_bytes());
    assert_eq!(&bytes[40..48], &(-0.25f64).to_le_bytes());

    let decoded = Twist::decode(&bytes).expect("decode Twist");
    assert_eq!(decoded, twist);
}

#[test]
fn test_twist_truncated_is_out_of_buffer() {
    let bytes = Twist::default().encode().expect("encode Twist");

    let err = Twist::decode(&bytes[..47]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBuffer);
}

// ============================================================================
// example_interfaces/AddTwoInts Tests
// ============================================================================

#[test]
fn test_add_two_ints_request_encoding() {
    let bytes = AddTwoIntsRequest::new(3, 5).encode().expect("encode request");
    assert_eq!(bytes, vec![0x03, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00]);

    let decoded = AddTwoIntsRequest::decode(&bytes).expect("decode request");
    assert_eq!(decoded, AddTwoIntsRequest::new(3, 5));
}

#[test]
fn test_add_two_ints_response_encoding() {
    let bytes = AddTwoIntsResponse::new(8).encode().expect("encode response");
    assert_eq!(bytes, vec![0x08, 0x00, 0x00, 0x00]);
}

#[test]
fn test_add_two_ints_negative_values() {
    let bytes = AddTwoIntsRequest::new(-1, i32::MIN)
        .encode()
        .expect("encode request");
    assert_eq!(bytes, vec![0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x80]);
}

#[test]
fn test_add_two_ints_int64_width() {
    let codec = CdrCodec::with_config(CodecConfig {
        int_width: IntWidth::Int64,
        ..CodecConfig::default()
    });

    let bytes = AddTwoIntsRequest::new(3, 5)
        .encode_with(&codec)
        .expect("encode request");
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[0..8], &3i64.to_le_bytes());
    assert_eq!(&bytes[8..16], &5i64.to_le_bytes());
}

// ============================================================================
// Schema Mismatch Tests
// ============================================================================

#[test]
fn test_response_bytes_decoded_as_request() {
    let bytes = AddTwoIntsResponse::new(8).encode().expect("encode response");

    let err = AddTwoIntsRequest::decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBuffer);
}

#[test]
fn test_request_bytes_decoded_as_vector3() {
    let bytes = AddTwoIntsRequest::new(3, 5).encode().expect("encode request");

    let err = Vector3::decode(&bytes).unwrap_err();
    assert!(err.is_decode_error());
}

#[test]
fn test_typed_conversion_reports_schema_mismatch() {
    let value = Vector3::new(1.0, 2.0, 3.0).to_value();

    let err = AddTwoIntsRequest::from_value(&value).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
}

#[test]
fn test_strict_decode_rejects_trailing_bytes() {
    let codec = CdrCodec::with_config(CodecConfig {
        strict: true,
        ..CodecConfig::default()
    });
    let mut bytes = AddTwoIntsResponse::new(8).encode().expect("encode response");
    bytes.push(0x00);

    let ty = codec
        .schemas()
        .resolve("AddTwoInts_Response")
        .expect("resolve type");
    let err = codec.decode(&bytes, &ty).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TrailingBytes);

    // Lenient decoding ignores the extra byte.
    let sum = AddTwoIntsResponse::decode(&bytes).expect("lenient decode");
    assert_eq!(sum.sum, 8);
}
