// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout ros2cdr.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Typed codec errors
//! - [`CodecValue`] - Unified value representation
//! - [`Encoding`] - Message encoding format identifier

pub mod error;
pub mod value;

pub use error::{CodecError, ErrorKind, Result};
pub use value::{CodecValue, DecodedMessage};

/// Encoding format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// CDR (Common Data Representation) encoding
    Cdr,
    /// JSON encoding
    Json,
}

/// Error returned when parsing an `Encoding` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseEncodingError {
    _private: (),
}

impl std::fmt::Display for ParseEncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid encoding name, expected 'cdr' or 'json'")
    }
}

impl std::error::Error for ParseEncodingError {}

impl std::str::FromStr for Encoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cdr" => Ok(Encoding::Cdr),
            "json" => Ok(Encoding::Json),
            _ => Err(ParseEncodingError { _private: () }),
        }
    }
}

impl Encoding {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Cdr => "cdr",
            Encoding::Json => "json",
        }
    }
}
