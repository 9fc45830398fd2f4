// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for ros2cdr.
//!
//! Decode errors describe malformed or truncated input. Encode errors describe
//! values that do not fit the schema they are encoded against; those are
//! always raised before the first byte is written.
//!
//! The CDR wire format carries no type tag or magic number, so decoding a
//! buffer against the wrong schema cannot be detected directly. A schema
//! mismatch surfaces as one of [`CodecError::OutOfBuffer`],
//! [`CodecError::InvalidBoolValue`], [`CodecError::InvalidUtf8`],
//! [`CodecError::MissingTerminator`] or, in strict mode,
//! [`CodecError::TrailingBytes`]. [`CodecError::SchemaMismatch`] is only
//! produced when a decoded value is converted into a typed message whose
//! shape it does not have.

use thiserror::Error;

/// Errors that can occur while encoding or decoding CDR data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// A read (or an alignment skip) would go past the end of the buffer.
    #[error("Out of buffer: requested {requested} bytes at position {position}, but only {available} bytes available")]
    OutOfBuffer {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when the error occurred
        position: usize,
    },

    /// A boolean byte was neither 0 nor 1.
    #[error("Invalid bool value {value:#04x} at position {position}")]
    InvalidBoolValue {
        /// The offending byte
        value: u8,
        /// Position of the byte
        position: usize,
    },

    /// String bytes are not valid UTF-8.
    #[error("Invalid UTF-8 in string at position {position}: {message}")]
    InvalidUtf8 {
        /// Position of the string length prefix
        position: usize,
        /// Decoder message
        message: String,
    },

    /// Wide string code units are not valid UTF-16.
    #[error("Invalid UTF-16 in wide string at position {position}")]
    InvalidUtf16 {
        /// Position of the string length prefix
        position: usize,
    },

    /// The final byte (or code unit) of a string is not the zero terminator.
    #[error("String at position {position} is missing its terminator")]
    MissingTerminator {
        /// Position of the string length prefix
        position: usize,
    },

    /// A decoded value does not have the shape of the requested type.
    #[error("Schema mismatch for '{type_name}': {reason}")]
    SchemaMismatch {
        /// Type that was expected
        type_name: String,
        /// What did not match
        reason: String,
    },

    /// Bytes remained after the top-level value in strict mode.
    #[error("{count} trailing bytes after decoding '{type_name}'")]
    TrailingBytes {
        /// Type that was decoded
        type_name: String,
        /// Number of unread bytes
        count: usize,
    },

    /// A length prefix exceeds the configured limit.
    #[error("Length {length} at position {position} exceeds the limit of {limit}")]
    LengthExceeded {
        /// Length that was read (or is about to be written)
        length: usize,
        /// Position of the length prefix
        position: usize,
        /// Configured limit
        limit: usize,
    },

    /// A fixed-size array value has the wrong number of elements.
    #[error("Array length mismatch at '{path}': expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Field path
        path: String,
        /// Length declared by the schema
        expected: usize,
        /// Length of the supplied value
        actual: usize,
    },

    /// A value cannot be encoded as the declared field type.
    #[error("Type mismatch at '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Field path
        path: String,
        /// Declared type
        expected: String,
        /// Supplied value
        actual: String,
    },

    /// A struct value lacks a field declared by its schema.
    #[error("Missing field '{path}'")]
    MissingField {
        /// Field path
        path: String,
    },

    /// Type not found in the schema table.
    #[error("Type not found: '{type_name}'")]
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// The encapsulation header names a representation this codec does not speak.
    #[error("Unsupported encapsulation kind {kind:#06x}")]
    UnsupportedEncapsulation {
        /// Representation identifier from the header
        kind: u16,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// JSON conversion error.
    #[error("JSON error: {message}")]
    Json {
        /// Error message
        message: String,
    },
}

/// Fieldless discriminant of [`CodecError`], for matching on error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfBuffer,
    InvalidBoolValue,
    InvalidUtf8,
    InvalidUtf16,
    MissingTerminator,
    SchemaMismatch,
    TrailingBytes,
    LengthExceeded,
    LengthMismatch,
    TypeMismatch,
    MissingField,
    TypeNotFound,
    UnsupportedEncapsulation,
    Config,
    Json,
}

impl CodecError {
    /// Create an out-of-buffer error.
    pub fn out_of_buffer(requested: usize, available: usize, position: usize) -> Self {
        CodecError::OutOfBuffer {
            requested,
            available,
            position,
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::SchemaMismatch {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        CodecError::TypeMismatch {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        CodecError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CodecError::Config {
            message: message.into(),
        }
    }

    /// Create a JSON conversion error.
    pub fn json(message: impl Into<String>) -> Self {
        CodecError::Json {
            message: message.into(),
        }
    }

    /// Get the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::OutOfBuffer { .. } => ErrorKind::OutOfBuffer,
            CodecError::InvalidBoolValue { .. } => ErrorKind::InvalidBoolValue,
            CodecError::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
            CodecError::InvalidUtf16 { .. } => ErrorKind::InvalidUtf16,
            CodecError::MissingTerminator { .. } => ErrorKind::MissingTerminator,
            CodecError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            CodecError::TrailingBytes { .. } => ErrorKind::TrailingBytes,
            CodecError::LengthExceeded { .. } => ErrorKind::LengthExceeded,
            CodecError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            CodecError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CodecError::MissingField { .. } => ErrorKind::MissingField,
            CodecError::TypeNotFound { .. } => ErrorKind::TypeNotFound,
            CodecError::UnsupportedEncapsulation { .. } => ErrorKind::UnsupportedEncapsulation,
            CodecError::Config { .. } => ErrorKind::Config,
            CodecError::Json { .. } => ErrorKind::Json,
        }
    }

    /// Check if this error was raised while reading wire data.
    ///
    /// These are the errors through which a schema mismatch shows up.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::OutOfBuffer
                | ErrorKind::InvalidBoolValue
                | ErrorKind::InvalidUtf8
                | ErrorKind::InvalidUtf16
                | ErrorKind::MissingTerminator
                | ErrorKind::TrailingBytes
                | ErrorKind::LengthExceeded
                | ErrorKind::UnsupportedEncapsulation
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::OutOfBuffer {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::InvalidBoolValue { value, position } => vec![
                ("value", value.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::InvalidUtf8 { position, message } => vec![
                ("position", position.to_string()),
                ("message", message.clone()),
            ],
            CodecError::InvalidUtf16 { position } | CodecError::MissingTerminator { position } => {
                vec![("position", position.to_string())]
            }
            CodecError::SchemaMismatch { type_name, reason } => {
                vec![("type", type_name.clone()), ("reason", reason.clone())]
            }
            CodecError::TrailingBytes { type_name, count } => {
                vec![("type", type_name.clone()), ("count", count.to_string())]
            }
            CodecError::LengthExceeded {
                length,
                position,
                limit,
            } => vec![
                ("length", length.to_string()),
                ("position", position.to_string()),
                ("limit", limit.to_string()),
            ],
            CodecError::LengthMismatch {
                path,
                expected,
                actual,
            } => vec![
                ("path", path.clone()),
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            CodecError::TypeMismatch {
                path,
                expected,
                actual,
            } => vec![
                ("path", path.clone()),
                ("expected", expected.clone()),
                ("actual", actual.clone()),
            ],
            CodecError::MissingField { path } => vec![("path", path.clone())],
            CodecError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            CodecError::UnsupportedEncapsulation { kind } => vec![("kind", kind.to_string())],
            CodecError::Config { message } | CodecError::Json { message } => {
                vec![("message", message.clone())]
            }
        }
    }
}

/// Result type for ros2cdr operations.
pub type Result<T> = std::result::Result<T, CodecError>;
