// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR (Common Data Representation) decoder implementation.
//!
//! Decodes headerless little-endian CDR payloads by walking the type
//! descriptor. Fields are read in declaration order from one cursor, so
//! alignment accumulates across field and nesting boundaries.
//!
//! # Schema mismatches
//!
//! The payload carries no type tag, so decoding against the wrong type is
//! not detected as such. It surfaces as [`CodecError::OutOfBuffer`],
//! [`CodecError::InvalidBoolValue`], [`CodecError::InvalidUtf8`] or
//! [`CodecError::MissingTerminator`], or, with strict decoding enabled, as
//! [`CodecError::TrailingBytes`]. A payload that happens to be long enough
//! and well-formed for the wrong type decodes without error.

use crate::core::{CodecError, CodecValue, DecodedMessage, Result};
use crate::schema::ast::{FieldType, MessageType, PrimitiveType};

use super::cursor::{CdrCursor, DEFAULT_MAX_SEQUENCE_LENGTH};

/// CDR decoder for ROS 2 messages.
#[derive(Debug, Clone, Copy)]
pub struct CdrDecoder {
    /// Upper bound for sequence and string length prefixes
    max_sequence_length: usize,
    /// Reject unread bytes after the top-level value
    strict: bool,
}

impl Default for CdrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CdrDecoder {
    /// Create a new lenient CDR decoder with the default length limit.
    pub fn new() -> Self {
        Self {
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            strict: false,
        }
    }

    /// Set the upper bound for sequence and string length prefixes.
    #[must_use]
    pub fn with_limit(mut self, max_sequence_length: usize) -> Self {
        self.max_sequence_length = max_sequence_length;
        self
    }

    /// Enable or disable strict decoding.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Decode a headerless payload as `ty`.
    pub fn decode(&self, data: &[u8], ty: &FieldType) -> Result<CodecValue> {
        let mut cursor = CdrCursor::with_limit(data, self.max_sequence_length);
        let result = self.decode_value(&mut cursor, ty).and_then(|value| {
            if self.strict && !cursor.is_at_end() {
                return Err(CodecError::TrailingBytes {
                    type_name: ty.label(),
                    count: cursor.remaining(),
                });
            }
            Ok(value)
        });

        if let Err(err) = &result {
            tracing::debug!(
                type_name = %ty,
                len = data.len(),
                fields = ?err.log_fields(),
                "CDR decode failed"
            );
        }
        result
    }

    /// Decode a headerless payload as the struct `msg_type`.
    pub fn decode_message(&self, data: &[u8], msg_type: &MessageType) -> Result<DecodedMessage> {
        let mut cursor = CdrCursor::with_limit(data, self.max_sequence_length);
        let message = self.decode_struct(&mut cursor, msg_type);
        let message = match message {
            Ok(_) if self.strict && !cursor.is_at_end() => Err(CodecError::TrailingBytes {
                type_name: msg_type.name.clone(),
                count: cursor.remaining(),
            }),
            other => other,
        };

        if let Err(err) = &message {
            tracing::debug!(
                type_name = %msg_type.name,
                len = data.len(),
                fields = ?err.log_fields(),
                "CDR decode failed"
            );
        }
        message
    }

    fn decode_value(&self, cursor: &mut CdrCursor<'_>, ty: &FieldType) -> Result<CodecValue> {
        Ok(match ty {
            FieldType::Primitive(prim) => self.decode_primitive(cursor, *prim)?,
            FieldType::String => CodecValue::String(cursor.read_string()?),
            FieldType::WString => CodecValue::String(cursor.read_wstring()?),
            FieldType::Array { element, len } => {
                let mut items = Vec::with_capacity((*len).min(cursor.remaining()));
                for _ in 0..*len {
                    items.push(self.decode_value(cursor, element)?);
                }
                CodecValue::Array(items)
            }
            FieldType::Sequence(element) => {
                let count = cursor.read_sequence_length()?;
                // A bogus count must not drive a large allocation.
                let mut items = Vec::with_capacity(count.min(cursor.remaining()));
                for _ in 0..count {
                    items.push(self.decode_value(cursor, element)?);
                }
                CodecValue::Array(items)
            }
            FieldType::Struct(msg_type) => CodecValue::Struct(self.decode_struct(cursor, msg_type)?),
        })
    }

    fn decode_struct(
        &self,
        cursor: &mut CdrCursor<'_>,
        msg_type: &MessageType,
    ) -> Result<DecodedMessage> {
        let mut message = DecodedMessage::with_capacity(msg_type.fields.len());
        for field in &msg_type.fields {
            let value = self.decode_value(cursor, &field.field_type)?;
            message.insert(field.name.clone(), value);
        }
        Ok(message)
    }

    fn decode_primitive(
        &self,
        cursor: &mut CdrCursor<'_>,
        prim: PrimitiveType,
    ) -> Result<CodecValue> {
        Ok(match prim {
            PrimitiveType::Bool => CodecValue::Bool(cursor.read_bool()?),
            PrimitiveType::Int8 => CodecValue::Int8(cursor.read_i8()?),
            PrimitiveType::Int16 => CodecValue::Int16(cursor.read_i16()?),
            PrimitiveType::Int32 => CodecValue::Int32(cursor.read_i32()?),
            PrimitiveType::Int64 => CodecValue::Int64(cursor.read_i64()?),
            PrimitiveType::UInt8 => CodecValue::UInt8(cursor.read_u8()?),
            PrimitiveType::UInt16 => CodecValue::UInt16(cursor.read_u16()?),
            PrimitiveType::UInt32 => CodecValue::UInt32(cursor.read_u32()?),
            PrimitiveType::UInt64 => CodecValue::UInt64(cursor.read_u64()?),
            PrimitiveType::Float32 => CodecValue::Float32(cursor.read_f32()?),
            PrimitiveType::Float64 => CodecValue::Float64(cursor.read_f64()?),
        })
    }
}
