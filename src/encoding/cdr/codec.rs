// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR codec implementation wrapping the decoder and encoder.

use crate::config::CodecConfig;
use crate::core::{CodecValue, Encoding, Result};
use crate::encoding::codec::MessageCodec;
use crate::schema::{FieldType, SchemaTable};

use super::encapsulation::{frame, unframe};

/// CDR codec implementing the unified codec interface.
///
/// Stateless between calls: every encode owns a fresh buffer and every decode
/// a fresh cursor, so one codec can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct CdrCodec {
    config: CodecConfig,
}

impl CdrCodec {
    /// Create a new CDR codec with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a CDR codec with the given configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get the schema table for the configured integer width.
    pub fn schemas(&self) -> &'static SchemaTable {
        self.config.schemas()
    }

    /// Encode a value as the named type.
    pub fn encode_named(&self, type_name: &str, value: &CodecValue) -> Result<Vec<u8>> {
        let ty = self.schemas().resolve(type_name)?;
        self.encode(value, &ty)
    }

    /// Decode bytes as the named type.
    pub fn decode_named(&self, type_name: &str, data: &[u8]) -> Result<CodecValue> {
        let ty = self.schemas().resolve(type_name)?;
        self.decode(data, &ty)
    }
}

impl MessageCodec for CdrCodec {
    fn encode(&self, value: &CodecValue, ty: &FieldType) -> Result<Vec<u8>> {
        let mut encoder = self.config.encoder();
        encoder.encode_message(value, ty)?;
        let payload = encoder.finish();
        Ok(if self.config.encapsulation {
            frame(&payload)
        } else {
            payload
        })
    }

    fn decode(&self, data: &[u8], ty: &FieldType) -> Result<CodecValue> {
        let payload = if self.config.encapsulation {
            unframe(data)?
        } else {
            data
        };
        self.config.decoder().decode(payload, ty)
    }

    fn encoding_type(&self) -> Encoding {
        Encoding::Cdr
    }
}
