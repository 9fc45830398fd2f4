// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message encoding/decoding implementations.
//!
//! - [`cdr`] - CDR (Common Data Representation) encoding/decoding
//! - [`json`] - Schema-guided JSON encoding/decoding
//! - [`codec`] - Unified codec interface

pub mod cdr;
pub mod codec;
pub mod json;

pub use cdr::{CdrCalculator, CdrCodec, CdrCursor, CdrDecoder, CdrEncoder};
pub use codec::{CodecFactory, MessageCodec};
pub use json::JsonCodec;
