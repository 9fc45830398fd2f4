// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! RTPS encapsulation header.
//!
//! ROS 2 peers prefix every serialized payload with four bytes:
//!
//! ```text
//! +--------+--------+--------+--------+
//! | representation  |     options     |
//! | identifier (BE) |                 |
//! +--------+--------+--------+--------+
//! ```
//!
//! Only `CDR_LE` (`00 01`) is spoken here. Alignment inside the payload is
//! relative to the first byte after the header, so framing never changes the
//! payload bytes.

use crate::core::{CodecError, Result};

/// Size of the CDR encapsulation header (4 bytes).
pub const CDR_HEADER_SIZE: usize = 4;

/// Representation identifier from the encapsulation header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum EncapsulationKind {
    /// CDR, Big Endian
    CdrBe = 0x0000,
    /// CDR, Little Endian
    #[default]
    CdrLe = 0x0001,
    /// PL CDR, Big Endian
    PlCdrBe = 0x0002,
    /// PL CDR, Little Endian
    PlCdrLe = 0x0003,
    /// CDR2, Big Endian
    Cdr2Be = 0x0006,
    /// CDR2, Little Endian
    Cdr2Le = 0x0007,
    /// Delimited CDR2, Big Endian
    DelimitedCdr2Be = 0x0008,
    /// Delimited CDR2, Little Endian
    DelimitedCdr2Le = 0x0009,
    /// PL CDR2, Big Endian
    PlCdr2Be = 0x000a,
    /// PL CDR2, Little Endian
    PlCdr2Le = 0x000b,
}

impl EncapsulationKind {
    /// Look up a representation identifier.
    #[must_use]
    pub const fn from_id(id: u16) -> Option<Self> {
        Some(match id {
            0x0000 => Self::CdrBe,
            0x0001 => Self::CdrLe,
            0x0002 => Self::PlCdrBe,
            0x0003 => Self::PlCdrLe,
            0x0006 => Self::Cdr2Be,
            0x0007 => Self::Cdr2Le,
            0x0008 => Self::DelimitedCdr2Be,
            0x0009 => Self::DelimitedCdr2Le,
            0x000a => Self::PlCdr2Be,
            0x000b => Self::PlCdr2Le,
            _ => return None,
        })
    }

    /// Representation identifier.
    #[must_use]
    pub const fn id(self) -> u16 {
        self as u16
    }

    /// Check if this encapsulation uses little endian byte order.
    #[must_use]
    pub const fn is_little_endian(self) -> bool {
        self.id() & 0x0001 == 1
    }

    /// Header bytes for this kind with zero options.
    #[must_use]
    pub const fn header(self) -> [u8; CDR_HEADER_SIZE] {
        let id = self.id().to_be_bytes();
        [id[0], id[1], 0x00, 0x00]
    }
}

/// Prefix a payload with the `CDR_LE` encapsulation header.
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(CDR_HEADER_SIZE + payload.len());
    out.extend_from_slice(&EncapsulationKind::CdrLe.header());
    out.extend_from_slice(payload);
    out
}

/// Strip and check the encapsulation header, returning the payload.
///
/// The options bytes are ignored.
pub fn unframe(data: &[u8]) -> Result<&[u8]> {
    if data.len() < CDR_HEADER_SIZE {
        return Err(CodecError::out_of_buffer(CDR_HEADER_SIZE, data.len(), 0));
    }
    let id = u16::from_be_bytes([data[0], data[1]]);
    match EncapsulationKind::from_id(id) {
        Some(EncapsulationKind::CdrLe) => Ok(&data[CDR_HEADER_SIZE..]),
        _ => Err(CodecError::UnsupportedEncapsulation { kind: id }),
    }
}
