// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified codec interface for encoding-agnostic message processing.
//!
//! ## Architecture
//!
//! - **Core trait** ([`MessageCodec`]) - Defines the interface
//! - **Encoding-specific implementations** ([`CdrCodec`], [`JsonCodec`])
//! - **Factory** ([`CodecFactory`]) - Holds one codec per encoding
//!
//! ## Example
//!
//! ```
//! use ros2cdr::encoding::CodecFactory;
//! use ros2cdr::Encoding;
//!
//! let factory = CodecFactory::default();
//! assert_eq!(factory.get_codec(Encoding::Json).encoding_type(), Encoding::Json);
//! ```

use crate::config::CodecConfig;
use crate::core::{CodecValue, Encoding, Result};
use crate::schema::FieldType;

pub use super::cdr::CdrCodec;
pub use super::json::JsonCodec;

/// Unified codec interface for decoding and encoding values of a known type.
pub trait MessageCodec: Send + Sync {
    /// Encode a value as `ty`.
    ///
    /// The value is checked against `ty` before anything is produced.
    fn encode(&self, value: &CodecValue, ty: &FieldType) -> Result<Vec<u8>>;

    /// Decode raw bytes as `ty`.
    fn decode(&self, data: &[u8], ty: &FieldType) -> Result<CodecValue>;

    /// Get the encoding type this codec handles.
    fn encoding_type(&self) -> Encoding;
}

/// Factory holding one codec instance per encoding.
pub struct CodecFactory {
    cdr: CdrCodec,
    json: JsonCodec,
}

impl CodecFactory {
    /// Create a factory whose CDR codec uses `config`.
    pub fn new(config: CodecConfig) -> Self {
        Self {
            cdr: CdrCodec::with_config(config),
            json: JsonCodec::new(),
        }
    }

    /// Get the codec for the specified encoding.
    pub fn get_codec(&self, encoding: Encoding) -> &dyn MessageCodec {
        match encoding {
            Encoding::Cdr => &self.cdr,
            Encoding::Json => &self.json,
        }
    }

    /// Get the CDR codec.
    pub fn cdr(&self) -> &CdrCodec {
        &self.cdr
    }

    /// Convert bytes of one encoding into another.
    pub fn transcode(
        &self,
        data: &[u8],
        ty: &FieldType,
        from: Encoding,
        to: Encoding,
    ) -> Result<Vec<u8>> {
        let value = self.get_codec(from).decode(data, ty)?;
        self.get_codec(to).encode(&value, ty)
    }
}

impl Default for CodecFactory {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}
