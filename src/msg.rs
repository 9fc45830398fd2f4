// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed ROS 2 messages.
//!
//! Each type converts to and from the dynamic [`CodecValue`] form and is
//! encoded through the builtin schema table, so the typed and dynamic paths
//! always produce identical bytes.

use serde::{Deserialize, Serialize};

use crate::core::{CodecError, CodecValue, DecodedMessage, Result};
use crate::encoding::cdr::CdrCodec;
use crate::schema::builtin_types::{TWIST, VECTOR3};

/// A message with a builtin CDR schema.
pub trait CdrMessage: Sized {
    /// Full ROS 2 type name, e.g. `geometry_msgs/msg/Twist`.
    const TYPE_NAME: &'static str;

    /// Convert to the dynamic value form.
    fn to_value(&self) -> CodecValue;

    /// Convert from the dynamic value form.
    ///
    /// Fails with [`CodecError::SchemaMismatch`] when `value` does not have
    /// the shape of this type.
    fn from_value(value: &CodecValue) -> Result<Self>;

    /// Encode with the default configuration (no header, int32 services).
    fn encode(&self) -> Result<Vec<u8>> {
        self.encode_with(&CdrCodec::new())
    }

    /// Encode with a configured codec.
    fn encode_with(&self, codec: &CdrCodec) -> Result<Vec<u8>> {
        codec.encode_named(Self::TYPE_NAME, &self.to_value())
    }

    /// Decode with the default configuration.
    fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with(data, &CdrCodec::new())
    }

    /// Decode with a configured codec.
    fn decode_with(data: &[u8], codec: &CdrCodec) -> Result<Self> {
        Self::from_value(&codec.decode_named(Self::TYPE_NAME, data)?)
    }
}

/// Borrow the struct inside `value`.
pub(crate) fn struct_of<'v>(value: &'v CodecValue, type_name: &str) -> Result<&'v DecodedMessage> {
    value.as_struct().ok_or_else(|| {
        CodecError::schema_mismatch(type_name, format!("expected struct, got {}", value.type_name()))
    })
}

/// Borrow a named field.
pub(crate) fn field<'v>(
    msg: &'v DecodedMessage,
    type_name: &str,
    name: &str,
) -> Result<&'v CodecValue> {
    msg.get(name)
        .ok_or_else(|| CodecError::schema_mismatch(type_name, format!("missing field '{name}'")))
}

/// Read a float64 field. Only `Float64` values are accepted, so bits are kept.
fn field_f64(msg: &DecodedMessage, type_name: &str, name: &str) -> Result<f64> {
    match field(msg, type_name, name)? {
        CodecValue::Float64(v) => Ok(*v),
        other => Err(CodecError::schema_mismatch(
            type_name,
            format!("field '{name}' is {}, expected float64", other.type_name()),
        )),
    }
}

/// geometry_msgs/msg/Vector3
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Compare by bit pattern, so identical NaNs are equal.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
    }
}

impl CdrMessage for Vector3 {
    const TYPE_NAME: &'static str = VECTOR3;

    fn to_value(&self) -> CodecValue {
        CodecValue::Struct(
            DecodedMessage::with_capacity(3)
                .with("x", self.x)
                .with("y", self.y)
                .with("z", self.z),
        )
    }

    fn from_value(value: &CodecValue) -> Result<Self> {
        let msg = struct_of(value, Self::TYPE_NAME)?;
        Ok(Self {
            x: field_f64(msg, Self::TYPE_NAME, "x")?,
            y: field_f64(msg, Self::TYPE_NAME, "y")?,
            z: field_f64(msg, Self::TYPE_NAME, "z")?,
        })
    }
}

/// geometry_msgs/msg/Twist
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Twist {
    pub fn new(linear: Vector3, angular: Vector3) -> Self {
        Self { linear, angular }
    }

    /// Compare by bit pattern, so identical NaNs are equal.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.linear.bit_eq(&other.linear) && self.angular.bit_eq(&other.angular)
    }
}

impl CdrMessage for Twist {
    const TYPE_NAME: &'static str = TWIST;

    fn to_value(&self) -> CodecValue {
        CodecValue::Struct(
            DecodedMessage::with_capacity(2)
                .with("linear", self.linear.to_value())
                .with("angular", self.angular.to_value()),
        )
    }

    fn from_value(value: &CodecValue) -> Result<Self> {
        let msg = struct_of(value, Self::TYPE_NAME)?;
        Ok(Self {
            linear: Vector3::from_value(field(msg, Self::TYPE_NAME, "linear")?)?,
            angular: Vector3::from_value(field(msg, Self::TYPE_NAME, "angular")?)?,
        })
    }
}
