// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec configuration.
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! int_width = "int64"
//! encapsulation = true
//! strict = false
//! max_sequence_length = 1000000
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CodecError, Result};
use crate::encoding::cdr::cursor::DEFAULT_MAX_SEQUENCE_LENGTH;
use crate::encoding::cdr::{CdrDecoder, CdrEncoder};
use crate::schema::{builtin_schemas, IntWidth, SchemaTable};

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Integer width of the AddTwoInts fields.
    pub int_width: IntWidth,
    /// Prefix payloads with the 4-byte encapsulation header.
    pub encapsulation: bool,
    /// Reject unread bytes after the top-level value.
    pub strict: bool,
    /// Upper bound for sequence and string length prefixes.
    pub max_sequence_length: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            int_width: IntWidth::default(),
            encapsulation: false,
            strict: false,
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
        }
    }
}

impl CodecConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CodecError::config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CodecError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_sequence_length == 0 {
            return Err(CodecError::config("max_sequence_length must be at least 1"));
        }
        if self.max_sequence_length > u32::MAX as usize {
            return Err(CodecError::config(format!(
                "max_sequence_length must not exceed {}",
                u32::MAX
            )));
        }
        Ok(())
    }

    /// Builtin schema table for the configured integer width.
    pub fn schemas(&self) -> &'static SchemaTable {
        builtin_schemas(self.int_width)
    }

    /// Decoder honouring the length limit and strictness.
    pub fn decoder(&self) -> CdrDecoder {
        CdrDecoder::new()
            .with_limit(self.max_sequence_length)
            .strict(self.strict)
    }

    /// Encoder honouring the length limit.
    pub fn encoder(&self) -> CdrEncoder {
        CdrEncoder::new().with_limit(self.max_sequence_length)
    }
}
