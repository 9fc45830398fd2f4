// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AddTwoInts service handler.
//!
//! Transport-agnostic: the handler takes request bytes and returns response
//! bytes. Addressing, timeouts and buffer lifetime belong to the transport.

use crate::config::CodecConfig;
use crate::core::{CodecError, CodecValue, DecodedMessage, Result};
use crate::encoding::cdr::CdrCodec;
use crate::schema::builtin_types::{ADD_TWO_INTS_REQUEST, ADD_TWO_INTS_RESPONSE};
use crate::schema::IntWidth;

/// Serves `example_interfaces/srv/AddTwoInts` in the configured integer width.
///
/// The sum wraps on overflow, matching two's-complement addition on the peer.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use ros2cdr::service::AddTwoIntsService;
///
/// let service = AddTwoIntsService::default();
/// let response = service.handle(&[0x03, 0, 0, 0, 0x05, 0, 0, 0])?;
/// assert_eq!(response, vec![0x08, 0, 0, 0]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AddTwoIntsService {
    codec: CdrCodec,
}

impl AddTwoIntsService {
    /// Create a service using `config` for width, framing and strictness.
    pub fn new(config: CodecConfig) -> Self {
        Self {
            codec: CdrCodec::with_config(config),
        }
    }

    /// Integer width of the request and response fields.
    pub fn int_width(&self) -> IntWidth {
        self.codec.config().int_width
    }

    /// Handle one request payload and produce the response payload.
    pub fn handle(&self, request: &[u8]) -> Result<Vec<u8>> {
        let (a, b) = self.parse_request(request).map_err(|err| {
            tracing::warn!(
                len = request.len(),
                fields = ?err.log_fields(),
                "rejecting malformed AddTwoInts request"
            );
            err
        })?;
        let sum = self.add(a, b)?;
        tracing::debug!(a, b, sum, "AddTwoInts");
        self.encode_response(sum)
    }

    /// Sum in the configured width, wrapping on overflow.
    ///
    /// Operands must fit the configured width; out-of-range operands fail
    /// with [`CodecError::TypeMismatch`] instead of being truncated.
    pub fn add(&self, a: i64, b: i64) -> Result<i64> {
        match self.int_width() {
            IntWidth::Int32 => {
                let a = narrow(a, "a")?;
                let b = narrow(b, "b")?;
                Ok(i64::from(a.wrapping_add(b)))
            }
            IntWidth::Int64 => Ok(a.wrapping_add(b)),
        }
    }

    /// Encode a request, as a client would.
    pub fn encode_request(&self, a: i64, b: i64) -> Result<Vec<u8>> {
        let value = CodecValue::Struct(DecodedMessage::new().with("a", a).with("b", b));
        self.codec.encode_named(ADD_TWO_INTS_REQUEST, &value)
    }

    /// Decode a request into its two operands.
    pub fn parse_request(&self, data: &[u8]) -> Result<(i64, i64)> {
        let value = self.codec.decode_named(ADD_TWO_INTS_REQUEST, data)?;
        Ok((
            int_field(&value, ADD_TWO_INTS_REQUEST, "a")?,
            int_field(&value, ADD_TWO_INTS_REQUEST, "b")?,
        ))
    }

    /// Encode a response.
    pub fn encode_response(&self, sum: i64) -> Result<Vec<u8>> {
        let value = CodecValue::Struct(DecodedMessage::new().with("sum", sum));
        self.codec.encode_named(ADD_TWO_INTS_RESPONSE, &value)
    }

    /// Decode a response, as a client would.
    pub fn parse_response(&self, data: &[u8]) -> Result<i64> {
        let value = self.codec.decode_named(ADD_TWO_INTS_RESPONSE, data)?;
        int_field(&value, ADD_TWO_INTS_RESPONSE, "sum")
    }
}

fn narrow(value: i64, name: &str) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| CodecError::type_mismatch(name, "int32", format!("int64 {value}")))
}

fn int_field(value: &CodecValue, type_name: &str, name: &str) -> Result<i64> {
    value
        .as_struct()
        .and_then(|msg| msg.get(name))
        .and_then(CodecValue::as_i64)
        .ok_or_else(|| CodecError::schema_mismatch(type_name, format!("no integer field '{name}'")))
}
