// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use ros2cdr::{CodecValue, DecodedMessage, FieldType, MessageType, PrimitiveType};

// ============================================================================
// Mixed-Layout Fixture
// ============================================================================

/// A struct touching every alignment rule:
///
/// ```text
/// bool flag
/// uint32 count
/// string name
/// int16[] samples
/// float64[2] scale
/// uint8 tail
/// ```
pub fn mixed_type() -> FieldType {
    FieldType::Struct(Arc::new(
        MessageType::new("test_msgs/msg/Mixed")
            .with_field("flag", FieldType::primitive(PrimitiveType::Bool))
            .with_field("count", FieldType::primitive(PrimitiveType::UInt32))
            .with_field("name", FieldType::String)
            .with_field(
                "samples",
                FieldType::sequence(FieldType::primitive(PrimitiveType::Int16)),
            )
            .with_field(
                "scale",
                FieldType::array(FieldType::primitive(PrimitiveType::Float64), 2),
            )
            .with_field("tail", FieldType::primitive(PrimitiveType::UInt8)),
    ))
}

/// The value encoded by [`mixed_bytes`].
pub fn mixed_value() -> CodecValue {
    CodecValue::Struct(
        DecodedMessage::new()
            .with("flag", true)
            .with("count", 7u32)
            .with("name", "hi")
            .with(
                "samples",
                CodecValue::Array(vec![CodecValue::Int16(1), CodecValue::Int16(2)]),
            )
            .with(
                "scale",
                CodecValue::Array(vec![CodecValue::Float64(1.5), CodecValue::Float64(-2.0)]),
            )
            .with("tail", 9u8),
    )
}

/// Expected wire bytes for [`mixed_value`]: 41 bytes.
pub fn mixed_bytes() -> Vec<u8> {
    let mut bytes = vec![
        0x01, 0x00, 0x00, 0x00, // flag + 3 padding
        0x07, 0x00, 0x00, 0x00, // count
        0x03, 0x00, 0x00, 0x00, b'h', b'i', 0x00, // name
        0x00, // padding to 4
        0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, // samples
    ];
    bytes.extend_from_slice(&1.5f64.to_le_bytes());
    bytes.extend_from_slice(&(-2.0f64).to_le_bytes());
    bytes.push(0x09);
    bytes
}

/// Offsets of the padding bytes in [`mixed_bytes`].
pub const MIXED_PADDING: [usize; 4] = [1, 2, 3, 15];
