// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR encoder for writing little-endian CDR payloads.

use super::calculator::{CdrCalculator, FieldPath, Segment};
use super::cursor::DEFAULT_MAX_SEQUENCE_LENGTH;
use crate::core::{CodecError, CodecValue, Result};
use crate::schema::ast::{align_up, FieldType, MessageType, PrimitiveType};

/// Default initial capacity for the encoder buffer.
const DEFAULT_CAPACITY: usize = 64;

/// A primitive value converted to the exact wire type of its field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Scalar {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
}

impl Scalar {
    /// Convert a value to the wire type `prim`.
    ///
    /// Integers convert to any integer type they fit in. Any numeric value
    /// converts to a float type. Bool only accepts bool.
    pub(crate) fn coerce(prim: PrimitiveType, value: &CodecValue) -> Option<Self> {
        Some(match prim {
            PrimitiveType::Bool => Scalar::Bool(value.as_bool()?),
            PrimitiveType::Int8 => Scalar::Int8(value.coerce_int()?),
            PrimitiveType::Int16 => Scalar::Int16(value.coerce_int()?),
            PrimitiveType::Int32 => Scalar::Int32(value.coerce_int()?),
            PrimitiveType::Int64 => Scalar::Int64(value.coerce_int()?),
            PrimitiveType::UInt8 => Scalar::UInt8(value.coerce_int()?),
            PrimitiveType::UInt16 => Scalar::UInt16(value.coerce_int()?),
            PrimitiveType::UInt32 => Scalar::UInt32(value.coerce_int()?),
            PrimitiveType::UInt64 => Scalar::UInt64(value.coerce_int()?),
            PrimitiveType::Float32 => Scalar::Float32(value.coerce_f32()?),
            PrimitiveType::Float64 => Scalar::Float64(value.coerce_f64()?),
        })
    }

    fn write(self, encoder: &mut CdrEncoder) {
        match self {
            Scalar::Bool(v) => encoder.bool(v),
            Scalar::Int8(v) => encoder.int8(v),
            Scalar::Int16(v) => encoder.int16(v),
            Scalar::Int32(v) => encoder.int32(v),
            Scalar::Int64(v) => encoder.int64(v),
            Scalar::UInt8(v) => encoder.uint8(v),
            Scalar::UInt16(v) => encoder.uint16(v),
            Scalar::UInt32(v) => encoder.uint32(v),
            Scalar::UInt64(v) => encoder.uint64(v),
            Scalar::Float32(v) => encoder.float32(v),
            Scalar::Float64(v) => encoder.float64(v),
        };
    }
}

impl From<Scalar> for CodecValue {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Bool(v) => CodecValue::Bool(v),
            Scalar::Int8(v) => CodecValue::Int8(v),
            Scalar::Int16(v) => CodecValue::Int16(v),
            Scalar::Int32(v) => CodecValue::Int32(v),
            Scalar::Int64(v) => CodecValue::Int64(v),
            Scalar::UInt8(v) => CodecValue::UInt8(v),
            Scalar::UInt16(v) => CodecValue::UInt16(v),
            Scalar::UInt32(v) => CodecValue::UInt32(v),
            Scalar::UInt64(v) => CodecValue::UInt64(v),
            Scalar::Float32(v) => CodecValue::Float32(v),
            Scalar::Float64(v) => CodecValue::Float64(v),
        }
    }
}

/// CDR encoder for writing CDR-encoded data.
///
/// The encoder writes a headerless payload; alignment is relative to the
/// first byte it writes. Padding bytes are always zero.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use ros2cdr::encoding::cdr::encoder::CdrEncoder;
///
/// let mut encoder = CdrEncoder::new();
/// encoder.uint8(7).int32(42);
/// encoder.string("hi")?;
/// assert_eq!(
///     encoder.finish(),
///     vec![7, 0, 0, 0, 42, 0, 0, 0, 3, 0, 0, 0, b'h', b'i', 0]
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CdrEncoder {
    /// Output buffer
    buffer: Vec<u8>,
    /// Upper bound for sequence and string length prefixes
    max_sequence_length: usize,
}

impl Default for CdrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CdrEncoder {
    /// Create a new encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new encoder with the specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
        }
    }

    /// Set the upper bound for sequence and string length prefixes.
    #[must_use]
    pub fn with_limit(mut self, max_sequence_length: usize) -> Self {
        self.max_sequence_length = max_sequence_length;
        self
    }

    /// Get the current size of the encoded data.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Get a reference to the encoded data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the encoder and return the encoded data.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Align to the specified boundary, writing zero padding bytes.
    pub fn align(&mut self, size: usize) -> &mut Self {
        if size > 1 {
            let rem = self.buffer.len() % size;
            if rem > 0 {
                self.buffer.resize(self.buffer.len() + size - rem, 0);
            }
        }
        self
    }

    /// Write a boolean as a single 0/1 byte.
    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.uint8(u8::from(value))
    }

    /// Write an 8-bit signed integer.
    pub fn int8(&mut self, value: i8) -> &mut Self {
        self.buffer.push(value as u8);
        self
    }

    /// Write an 8-bit unsigned integer.
    pub fn uint8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    /// Write a 16-bit signed integer.
    pub fn int16(&mut self, value: i16) -> &mut Self {
        self.align(2).bytes(&value.to_le_bytes())
    }

    /// Write a 16-bit unsigned integer.
    pub fn uint16(&mut self, value: u16) -> &mut Self {
        self.align(2).bytes(&value.to_le_bytes())
    }

    /// Write a 32-bit signed integer.
    pub fn int32(&mut self, value: i32) -> &mut Self {
        self.align(4).bytes(&value.to_le_bytes())
    }

    /// Write a 32-bit unsigned integer.
    pub fn uint32(&mut self, value: u32) -> &mut Self {
        self.align(4).bytes(&value.to_le_bytes())
    }

    /// Write a 64-bit signed integer.
    pub fn int64(&mut self, value: i64) -> &mut Self {
        self.align(8).bytes(&value.to_le_bytes())
    }

    /// Write a 64-bit unsigned integer.
    pub fn uint64(&mut self, value: u64) -> &mut Self {
        self.align(8).bytes(&value.to_le_bytes())
    }

    /// Write a 32-bit float, preserving its bit pattern.
    pub fn float32(&mut self, value: f32) -> &mut Self {
        self.align(4).bytes(&value.to_bits().to_le_bytes())
    }

    /// Write a 64-bit double, preserving its bit pattern.
    pub fn float64(&mut self, value: f64) -> &mut Self {
        self.align(8).bytes(&value.to_bits().to_le_bytes())
    }

    /// Write raw bytes.
    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(data);
        self
    }

    /// Write a u32 length prefix, checked against the configured limit.
    fn length(&mut self, length: usize) -> Result<&mut Self> {
        let limit = self.max_sequence_length.min(u32::MAX as usize);
        if length > limit {
            return Err(CodecError::LengthExceeded {
                length,
                position: align_up(self.buffer.len(), 4),
                limit,
            });
        }
        Ok(self.uint32(length as u32))
    }

    /// Write a sequence length (for dynamic arrays).
    pub fn sequence_length(&mut self, value: usize) -> Result<&mut Self> {
        self.length(value)
    }

    /// Write a string: u32 byte count including the terminator, the bytes, a zero byte.
    pub fn string(&mut self, value: &str) -> Result<&mut Self> {
        self.length(value.len() + 1)?;
        self.buffer.reserve(value.len() + 1);
        self.buffer.extend_from_slice(value.as_bytes());
        self.buffer.push(0);
        Ok(self)
    }

    /// Write a wide string: u32 count of UTF-16 units including the terminator, then the units.
    pub fn wstring(&mut self, value: &str) -> Result<&mut Self> {
        let units: Vec<u16> = value.encode_utf16().chain(std::iter::once(0)).collect();
        self.length(units.len())?;
        for unit in units {
            self.uint16(unit);
        }
        Ok(self)
    }

    /// Encode a value against its type.
    ///
    /// The value is validated and sized first; on error nothing is written.
    ///
    /// Struct values must carry every field declared by the type; extra
    /// fields are ignored. Integer values are converted to the declared width
    /// when they fit, and rejected with [`CodecError::TypeMismatch`] when they
    /// do not.
    pub fn encode_message(&mut self, value: &CodecValue, ty: &FieldType) -> Result<()> {
        let size = CdrCalculator::message_size(value, ty, self.max_sequence_length)?;
        self.buffer.reserve(size);
        let start = self.buffer.len();
        let result = self.encode_value(value, ty, &mut FieldPath::default());
        if result.is_err() {
            self.buffer.truncate(start);
        }
        tracing::trace!(type_name = %ty, size, "encoded CDR value");
        result
    }

    /// Encode a single `CodecValue` based on its type.
    fn encode_value<'a>(
        &mut self,
        value: &CodecValue,
        ty: &'a FieldType,
        path: &mut FieldPath<'a>,
    ) -> Result<()> {
        match ty {
            FieldType::Primitive(prim) => {
                Scalar::coerce(*prim, value)
                    .ok_or_else(|| path.type_mismatch(ty, value))?
                    .write(self);
            }
            FieldType::String => {
                let s = value.as_str().ok_or_else(|| path.type_mismatch(ty, value))?;
                self.string(s)?;
            }
            FieldType::WString => {
                let s = value.as_str().ok_or_else(|| path.type_mismatch(ty, value))?;
                self.wstring(s)?;
            }
            FieldType::Array { element, len } => {
                let items = value
                    .as_array()
                    .ok_or_else(|| path.type_mismatch(ty, value))?;
                if items.len() != *len {
                    return Err(CodecError::LengthMismatch {
                        path: path.to_string(),
                        expected: *len,
                        actual: items.len(),
                    });
                }
                self.encode_elements(items, element, path)?;
            }
            FieldType::Sequence(element) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| path.type_mismatch(ty, value))?;
                self.sequence_length(items.len())?;
                self.encode_elements(items, element, path)?;
            }
            FieldType::Struct(msg_type) => {
                self.encode_struct(value, msg_type, path)?;
            }
        }
        Ok(())
    }

    fn encode_elements<'a>(
        &mut self,
        items: &[CodecValue],
        element: &'a FieldType,
        path: &mut FieldPath<'a>,
    ) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            path.push(Segment::Index(i));
            self.encode_value(item, element, path)?;
            path.pop();
        }
        Ok(())
    }

    /// Encode struct fields in declaration order on the shared buffer.
    fn encode_struct<'a>(
        &mut self,
        value: &CodecValue,
        msg_type: &'a MessageType,
        path: &mut FieldPath<'a>,
    ) -> Result<()> {
        let message = value.as_struct().ok_or_else(|| CodecError::TypeMismatch {
            path: path.to_string(),
            expected: msg_type.name.clone(),
            actual: value.type_name().to_string(),
        })?;
        for field in &msg_type.fields {
            path.push(Segment::Field(&field.name));
            let field_value = message.get(&field.name).ok_or_else(|| CodecError::MissingField {
                path: path.to_string(),
            })?;
            self.encode_value(field_value, &field.field_type, path)?;
            path.pop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::DecodedMessage;
    use crate::schema::builtin_types::{add_two_ints_request, vector3, IntWidth};

    #[test]
    fn test_encoder_primitives() {
        let mut encoder = CdrEncoder::new();
        encoder.bool(true).int16(-2).int32(0x01020304).int64(-1);
        assert_eq!(
            encoder.data(),
            &[
                0x01, 0x00, 0xFE, 0xFF, 0x04, 0x03, 0x02, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0xFF, 0xFF, 0xFF
            ]
        );
    }

    #[test]
    fn test_encoder_padding_is_zero() {
        let mut encoder = CdrEncoder::new();
        encoder.uint8(0xAA).float64(1.0);
        let data = encoder.finish();
        assert_eq!(data.len(), 16);
        assert_eq!(&data[1..8], &[0; 7]);
        assert_eq!(&data[8..], &1.0f64.to_le_bytes());
    }

    #[test]
    fn test_encoder_float_bits() {
        let nan = f32::from_bits(0x7FC0_0001);
        let mut encoder = CdrEncoder::new();
        encoder.float32(nan);
        assert_eq!(encoder.data(), &0x7FC0_0001u32.to_le_bytes());
    }

    #[test]
    fn test_encoder_string() {
        let mut encoder = CdrEncoder::new();
        encoder.string("").unwrap();
        assert_eq!(encoder.data(), &[0x01, 0x00, 0x00, 0x00, 0x00]);

        encoder.string("ab").unwrap();
        assert_eq!(
            &encoder.data()[5..],
            &[0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, b'a', b'b', 0x00]
        );
    }

    #[test]
    fn test_encoder_wstring() {
        let mut encoder = CdrEncoder::new();
        encoder.wstring("A").unwrap();
        assert_eq!(
            encoder.data(),
            &[0x02, 0x00, 0x00, 0x00, 0x41, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_encoder_length_limit() {
        let mut encoder = CdrEncoder::new().with_limit(2);
        encoder.uint8(1);
        assert_eq!(
            encoder.sequence_length(3).unwrap_err(),
            CodecError::LengthExceeded {
                length: 3,
                position: 4,
                limit: 2
            }
        );
    }

    #[test]
    fn test_encode_message_add_two_ints() {
        let ty = FieldType::Struct(Arc::new(add_two_ints_request(IntWidth::Int32)));
        let value = CodecValue::Struct(DecodedMessage::new().with("a", 3i64).with("b", 5i32));
        let mut encoder = CdrEncoder::new();
        encoder.encode_message(&value, &ty).unwrap();
        assert_eq!(encoder.finish(), vec![3, 0, 0, 0, 5, 0, 0, 0]);
    }

    #[test]
    fn test_encode_message_rejects_before_writing() {
        let ty = FieldType::Struct(Arc::new(vector3()));
        let value = CodecValue::Struct(
            DecodedMessage::new()
                .with("x", 1.0f64)
                .with("y", "two")
                .with("z", 3.0f64),
        );
        let mut encoder = CdrEncoder::new();
        let err = encoder.encode_message(&value, &ty).unwrap_err();
        assert_eq!(err, CodecError::type_mismatch("y", "float64", "string \"two\""));
        assert_eq!(encoder.size(), 0);
    }

    #[test]
    fn test_encode_message_ignores_extra_fields() {
        let ty = FieldType::Struct(Arc::new(add_two_ints_request(IntWidth::Int32)));
        let value = CodecValue::Struct(
            DecodedMessage::new()
                .with("a", 1i32)
                .with("b", 2i32)
                .with("c", 3i32),
        );
        let mut encoder = CdrEncoder::new();
        encoder.encode_message(&value, &ty).unwrap();
        assert_eq!(encoder.size(), 8);
    }

    #[test]
    fn test_scalar_coerce() {
        assert_eq!(
            Scalar::coerce(PrimitiveType::UInt8, &CodecValue::Int64(255)),
            Some(Scalar::UInt8(255))
        );
        assert_eq!(
            Scalar::coerce(PrimitiveType::UInt8, &CodecValue::Int64(-1)),
            None
        );
        assert_eq!(
            Scalar::coerce(PrimitiveType::Float64, &CodecValue::Int32(2)),
            Some(Scalar::Float64(2.0))
        );
        assert_eq!(
            Scalar::coerce(PrimitiveType::Bool, &CodecValue::Int32(1)),
            None
        );
        assert_eq!(
            Scalar::coerce(PrimitiveType::Int32, &CodecValue::Float64(1.0)),
            None
        );
    }
}
