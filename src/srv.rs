// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed ROS 2 service messages.

use serde::{Deserialize, Serialize};

use crate::core::{CodecError, CodecValue, DecodedMessage, Result};
use crate::msg::{field, struct_of, CdrMessage};
use crate::schema::builtin_types::{ADD_TWO_INTS_REQUEST, ADD_TWO_INTS_RESPONSE};

/// Read an integer field that must fit in `i32`.
///
/// Either integer width is accepted so that values decoded with a 64-bit
/// schema still convert when in range.
fn field_i32(msg: &DecodedMessage, type_name: &str, name: &str) -> Result<i32> {
    let value = field(msg, type_name, name)?;
    value.coerce_int().ok_or_else(|| {
        CodecError::schema_mismatch(
            type_name,
            format!("field '{name}' is {}, expected int32", value),
        )
    })
}

/// example_interfaces/srv/AddTwoInts request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddTwoIntsRequest {
    pub a: i32,
    pub b: i32,
}

impl AddTwoIntsRequest {
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }
}

impl CdrMessage for AddTwoIntsRequest {
    const TYPE_NAME: &'static str = ADD_TWO_INTS_REQUEST;

    fn to_value(&self) -> CodecValue {
        CodecValue::Struct(DecodedMessage::new().with("a", self.a).with("b", self.b))
    }

    fn from_value(value: &CodecValue) -> Result<Self> {
        let msg = struct_of(value, Self::TYPE_NAME)?;
        Ok(Self {
            a: field_i32(msg, Self::TYPE_NAME, "a")?,
            b: field_i32(msg, Self::TYPE_NAME, "b")?,
        })
    }
}

/// example_interfaces/srv/AddTwoInts response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddTwoIntsResponse {
    pub sum: i32,
}

impl AddTwoIntsResponse {
    pub fn new(sum: i32) -> Self {
        Self { sum }
    }
}

impl CdrMessage for AddTwoIntsResponse {
    const TYPE_NAME: &'static str = ADD_TWO_INTS_RESPONSE;

    fn to_value(&self) -> CodecValue {
        CodecValue::Struct(DecodedMessage::new().with("sum", self.sum))
    }

    fn from_value(value: &CodecValue) -> Result<Self> {
        let msg = struct_of(value, Self::TYPE_NAME)?;
        Ok(Self {
            sum: field_i32(msg, Self::TYPE_NAME, "sum")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use crate::encoding::cdr::CdrCodec;
    use crate::schema::IntWidth;

    #[test]
    fn test_request_bytes() {
        let bytes = AddTwoIntsRequest::new(3, 5).encode().unwrap();
        assert_eq!(bytes, vec![0x03, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00]);
        assert_eq!(
            AddTwoIntsRequest::decode(&bytes).unwrap(),
            AddTwoIntsRequest::new(3, 5)
        );
    }

    #[test]
    fn test_response_bytes() {
        let bytes = AddTwoIntsResponse::new(8).encode().unwrap();
        assert_eq!(bytes, vec![0x08, 0x00, 0x00, 0x00]);
        assert_eq!(AddTwoIntsResponse::decode(&bytes).unwrap().sum, 8);
    }

    #[test]
    fn test_negative_values() {
        let bytes = AddTwoIntsRequest::new(-1, i32::MIN).encode().unwrap();
        assert_eq!(&bytes[..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&bytes[4..], &[0x00, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn test_int64_codec() {
        let codec = CdrCodec::with_config(CodecConfig {
            int_width: IntWidth::Int64,
            ..CodecConfig::default()
        });
        let bytes = AddTwoIntsResponse::new(-8).encode_with(&codec).unwrap();
        assert_eq!(bytes, (-8i64).to_le_bytes().to_vec());
        assert_eq!(
            AddTwoIntsResponse::decode_with(&bytes, &codec).unwrap().sum,
            -8
        );

        let wide = i64::from(i32::MAX) + 1;
        let err = AddTwoIntsResponse::decode_with(&wide.to_le_bytes(), &codec).unwrap_err();
        assert!(matches!(err, CodecError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_truncated_request() {
        let err = AddTwoIntsRequest::decode(&[0x03, 0x00, 0x00, 0x00, 0x05]).unwrap_err();
        assert_eq!(err, CodecError::out_of_buffer(4, 1, 4));
    }
}
