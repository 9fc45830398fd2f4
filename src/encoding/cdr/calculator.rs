// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR size calculator for computing the size of CDR-encoded data.
//!
//! The calculator walks a value against its type exactly as the encoder
//! would, without writing. The encoder runs it first, so a value that does
//! not fit its schema is rejected before a single byte is produced.

use std::fmt;

use super::cursor::DEFAULT_MAX_SEQUENCE_LENGTH;
use super::encoder::Scalar;
use crate::core::{CodecError, CodecValue, Result};
use crate::schema::ast::{align_up, FieldType, MessageType, PrimitiveType};

/// CDR size calculator.
///
/// # Example
///
/// ```
/// use ros2cdr::encoding::cdr::calculator::CdrCalculator;
///
/// let mut calc = CdrCalculator::new();
/// calc.uint8();    // 1 byte
/// calc.int32();    // 3 padding + 4 bytes
/// calc.string(5);  // 4 (length) + 5 + 1 (terminator)
/// assert_eq!(calc.size(), 18);
/// ```
#[derive(Debug, Clone)]
pub struct CdrCalculator {
    /// Current size offset, relative to the payload start
    offset: usize,
    /// Upper bound for sequence and string length prefixes
    max_sequence_length: usize,
}

impl Default for CdrCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CdrCalculator {
    /// Create a new calculator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_SEQUENCE_LENGTH)
    }

    /// Create a calculator that rejects sequences and strings longer than `limit`.
    #[must_use]
    pub fn with_limit(max_sequence_length: usize) -> Self {
        Self {
            offset: 0,
            max_sequence_length,
        }
    }

    /// Get the current calculated size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.offset
    }

    /// Account for an aligned value of `size` bytes.
    fn increment_and_return(&mut self, size: usize) -> usize {
        self.offset = align_up(self.offset, size) + size;
        self.offset
    }

    /// Calculate size for an 8-bit signed/unsigned integer or bool.
    pub fn uint8(&mut self) -> usize {
        self.increment_and_return(1)
    }

    /// Calculate size for a 16-bit signed/unsigned integer.
    pub fn int16(&mut self) -> usize {
        self.increment_and_return(2)
    }

    /// Calculate size for a 32-bit signed/unsigned integer.
    pub fn int32(&mut self) -> usize {
        self.increment_and_return(4)
    }

    /// Calculate size for a 64-bit signed/unsigned integer.
    pub fn int64(&mut self) -> usize {
        self.increment_and_return(8)
    }

    /// Calculate size for a primitive.
    pub fn primitive(&mut self, prim: PrimitiveType) -> usize {
        self.increment_and_return(prim.size())
    }

    /// Calculate size for a string.
    ///
    /// # Arguments
    ///
    /// * `length` - The length of the string content in bytes (not including the terminator)
    pub fn string(&mut self, length: usize) -> usize {
        self.int32();
        self.offset += length + 1;
        self.offset
    }

    /// Calculate size for a wide string of `units` UTF-16 code units.
    pub fn wstring(&mut self, units: usize) -> usize {
        self.int32();
        self.offset += (units + 1) * 2;
        self.offset
    }

    /// Calculate size for a sequence length prefix.
    pub fn sequence_length(&mut self) -> usize {
        self.int32()
    }

    /// Validate `value` against `ty` and return its encoded size.
    pub fn message_size(value: &CodecValue, ty: &FieldType, limit: usize) -> Result<usize> {
        let mut calc = Self::with_limit(limit);
        calc.add_value(value, ty, &mut FieldPath::default())?;
        Ok(calc.size())
    }

    /// Validate `value` against `ty` and account for its encoding.
    pub(crate) fn add_value<'a>(
        &mut self,
        value: &CodecValue,
        ty: &'a FieldType,
        path: &mut FieldPath<'a>,
    ) -> Result<()> {
        match ty {
            FieldType::Primitive(prim) => {
                Scalar::coerce(*prim, value)
                    .ok_or_else(|| path.type_mismatch(ty, value))?;
                self.primitive(*prim);
            }
            FieldType::String => {
                let s = value.as_str().ok_or_else(|| path.type_mismatch(ty, value))?;
                self.check_length(s.len() + 1)?;
                self.string(s.len());
            }
            FieldType::WString => {
                let s = value.as_str().ok_or_else(|| path.type_mismatch(ty, value))?;
                let units = s.encode_utf16().count();
                self.check_length(units + 1)?;
                self.wstring(units);
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
                self.add_elements(items, element, path)?;
            }
            FieldType::Sequence(element) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| path.type_mismatch(ty, value))?;
                self.check_length(items.len())?;
                self.sequence_length();
                self.add_elements(items, element, path)?;
            }
            FieldType::Struct(msg_type) => {
                self.add_struct(value, msg_type, path)?;
            }
        }
        Ok(())
    }

    fn add_elements<'a>(
        &mut self,
        items: &[CodecValue],
        element: &'a FieldType,
        path: &mut FieldPath<'a>,
    ) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            path.push(Segment::Index(i));
            self.add_value(item, element, path)?;
            path.pop();
        }
        Ok(())
    }

    fn add_struct<'a>(
        &mut self,
        value: &CodecValue,
        msg_type: &'a MessageType,
        path: &mut FieldPath<'a>,
    ) -> Result<()> {
        let message = value.as_struct().ok_or_else(|| CodecError::TypeMismatch {
            path: path.to_string(),
            expected: msg_type.name.clone(),
            actual: describe(value),
        })?;
        for field in &msg_type.fields {
            path.push(Segment::Field(&field.name));
            let field_value = message.get(&field.name).ok_or_else(|| CodecError::MissingField {
                path: path.to_string(),
            })?;
            self.add_value(field_value, &field.field_type, path)?;
            path.pop();
        }
        Ok(())
    }

    /// Check a length prefix about to be written at the next aligned slot.
    fn check_length(&self, length: usize) -> Result<()> {
        let limit = self.max_sequence_length.min(u32::MAX as usize);
        if length > limit {
            return Err(CodecError::LengthExceeded {
                length,
                position: align_up(self.offset, 4),
                limit,
            });
        }
        Ok(())
    }
}

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, Copy)]
pub(crate) enum Segment<'a> {
    Field(&'a str),
    Index(usize),
}

/// Location of a value inside a message, rendered as `linear.x` or `samples[2]`.
#[derive(Debug, Default, Clone)]
pub(crate) struct FieldPath<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> FieldPath<'a> {
    pub(crate) fn push(&mut self, segment: Segment<'a>) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    pub(crate) fn type_mismatch(&self, ty: &FieldType, value: &CodecValue) -> CodecError {
        CodecError::type_mismatch(self.to_string(), ty.label(), describe(value))
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !matches!(self.segments.first(), Some(Segment::Field(_))) {
            write!(f, "<root>")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{name}")?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// Describe a value for an error message: scalars with their value, containers by kind.
fn describe(value: &CodecValue) -> String {
    if value.is_container() {
        value.type_name().to_string()
    } else {
        format!("{} {}", value.type_name(), value)
    }
}
