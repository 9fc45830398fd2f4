// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR (Common Data Representation) module.
//!
//! Provides plain little-endian CDR encoding, decoding, and size calculation
//! for ROS 2 messages, plus the optional RTPS encapsulation header.

pub mod calculator;
pub mod codec;
pub mod cursor;
pub mod decoder;
pub mod encapsulation;
pub mod encoder;

pub use calculator::CdrCalculator;
pub use codec::CdrCodec;
pub use cursor::CdrCursor;
pub use decoder::CdrDecoder;
pub use encapsulation::{frame, unframe, EncapsulationKind, CDR_HEADER_SIZE};
pub use encoder::CdrEncoder;
