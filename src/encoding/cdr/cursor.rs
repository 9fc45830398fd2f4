// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR cursor for reading little-endian CDR payloads with proper alignment.

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{CodecError, Result};

/// Default upper bound for sequence and string length prefixes.
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 10_000_000;

/// CDR cursor over a headerless payload.
///
/// Alignment is computed as `offset % size` with the offset measured from the
/// start of the payload. Nested structs do not reset the origin: padding
/// accumulates across field and nesting boundaries.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use ros2cdr::encoding::cdr::cursor::CdrCursor;
///
/// let data = [0x01, 0x00, 0x00, 0x00, 0x2A, 0x00, 0x00, 0x00];
/// let mut cursor = CdrCursor::new(&data);
/// assert!(cursor.read_bool()?);
/// assert_eq!(cursor.read_u32()?, 42);
/// assert!(cursor.is_at_end());
/// # Ok(())
/// # }
/// ```
pub struct CdrCursor<'a> {
    data: &'a [u8],
    offset: usize,
    max_sequence_length: usize,
}

impl<'a> CdrCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_limit(data, DEFAULT_MAX_SEQUENCE_LENGTH)
    }

    /// Create a cursor that rejects length prefixes above `max_sequence_length`.
    pub fn with_limit(data: &'a [u8], max_sequence_length: usize) -> Self {
        Self {
            data,
            offset: 0,
            max_sequence_length,
        }
    }

    /// Get the current position relative to the payload start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Skip padding up to the next multiple of `size`.
    ///
    /// Padding bytes are not inspected.
    pub fn align(&mut self, size: usize) -> Result<()> {
        if size <= 1 {
            return Ok(());
        }
        let rem = self.offset % size;
        if rem > 0 {
            let padding = size - rem;
            if padding > self.remaining() {
                return Err(CodecError::out_of_buffer(
                    padding,
                    self.remaining(),
                    self.offset,
                ));
            }
            self.offset += padding;
        }
        Ok(())
    }

    /// Take `count` bytes without alignment.
    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::out_of_buffer(
                count,
                self.remaining(),
                self.offset,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Align to `size`, then take `size` bytes.
    #[inline]
    fn take_aligned(&mut self, size: usize) -> Result<&'a [u8]> {
        self.align(size)?;
        self.take(size)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a boolean. Only 0 and 1 are accepted.
    pub fn read_bool(&mut self) -> Result<bool> {
        let position = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(CodecError::InvalidBoolValue { value, position }),
        }
    }

    /// Read a u16 value.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take_aligned(2)?))
    }

    /// Read an i16 value.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.take_aligned(2)?))
    }

    /// Read a u32 value.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take_aligned(4)?))
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take_aligned(4)?))
    }

    /// Read a u64 value.
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.take_aligned(8)?))
    }

    /// Read an i64 value.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.take_aligned(8)?))
    }

    /// Read an f32 value. Every bit pattern is accepted.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(LittleEndian::read_u32(self.take_aligned(4)?)))
    }

    /// Read an f64 value. Every bit pattern is accepted.
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(LittleEndian::read_u64(self.take_aligned(8)?)))
    }

    /// Read a byte slice.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.take(count)
    }

    /// Read a u32 length prefix and check it against the configured limit.
    ///
    /// Returns the length and the position of the prefix.
    fn read_length(&mut self) -> Result<(usize, usize)> {
        self.align(4)?;
        let position = self.offset;
        let length = self.read_u32()? as usize;
        if length > self.max_sequence_length {
            return Err(CodecError::LengthExceeded {
                length,
                position,
                limit: self.max_sequence_length,
            });
        }
        Ok((length, position))
    }

    /// Read a sequence element count.
    pub fn read_sequence_length(&mut self) -> Result<usize> {
        self.read_length().map(|(length, _)| length)
    }

    /// Read a string.
    ///
    /// Layout: u32 byte count including the terminator, the UTF-8 bytes, then
    /// a single zero byte. No trailing padding.
    pub fn read_string(&mut self) -> Result<String> {
        let (length, position) = self.read_length()?;
        if length == 0 {
            return Err(CodecError::MissingTerminator { position });
        }
        let bytes = self.take(length)?;
        let (terminator, body) = match bytes.split_last() {
            Some(split) => split,
            None => return Err(CodecError::MissingTerminator { position }),
        };
        if *terminator != 0 {
            return Err(CodecError::MissingTerminator { position });
        }
        std::str::from_utf8(body)
            .map(str::to_owned)
            .map_err(|e| CodecError::InvalidUtf8 {
                position,
                message: e.to_string(),
            })
    }

    /// Read a wide string.
    ///
    /// Layout: u32 count of UTF-16 code units including a zero terminator
    /// unit, then the units.
    pub fn read_wstring(&mut self) -> Result<String> {
        let (length, position) = self.read_length()?;
        if length == 0 {
            return Err(CodecError::MissingTerminator { position });
        }
        let byte_len = length.checked_mul(2).ok_or_else(|| {
            CodecError::out_of_buffer(usize::MAX, self.remaining(), self.offset)
        })?;
        if byte_len > self.remaining() {
            return Err(CodecError::out_of_buffer(
                byte_len,
                self.remaining(),
                self.offset,
            ));
        }
        let mut units = Vec::with_capacity(length);
        for _ in 0..length {
            units.push(self.read_u16()?);
        }
        if units.pop() != Some(0) {
            return Err(CodecError::MissingTerminator { position });
        }
        String::from_utf16(&units).map_err(|_| CodecError::InvalidUtf16 { position })
    }
}
