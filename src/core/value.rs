// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec value type system.
//!
//! A [`CodecValue`] is a materialized message: leaves are primitive values,
//! internal nodes are arrays (fixed-size arrays and sequences share one
//! variant, the schema tells them apart) or structs. Struct fields keep their
//! insertion order, which for decoded values is the wire order.

use std::fmt;

/// A struct value as an ordered list of `(field name, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedMessage {
    fields: Vec<(String, CodecValue)>,
}

impl DecodedMessage {
    /// Create an empty message.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create an empty message with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Insert a field, replacing any existing field of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: CodecValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<CodecValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&CodecValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Get a field by dotted path (e.g. `"linear.x"`).
    pub fn get_path(&self, path: &str) -> Option<&CodecValue> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_struct()?.get(part)?;
        }
        Some(current)
    }

    /// Iterate over fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CodecValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the message has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, CodecValue)> for DecodedMessage {
    fn from_iter<I: IntoIterator<Item = (String, CodecValue)>>(iter: I) -> Self {
        let mut msg = DecodedMessage::new();
        for (name, value) in iter {
            msg.insert(name, value);
        }
        msg
    }
}

impl IntoIterator for DecodedMessage {
    type Item = (String, CodecValue);
    type IntoIter = std::vec::IntoIter<(String, CodecValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Unified value type for CDR messages.
///
/// `PartialEq` follows IEEE-754 semantics for floats (NaN != NaN); use
/// [`CodecValue::bit_eq`] to compare floats by bit pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecValue {
    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8); also carries wstring values
    String(String),

    // Fixed array or sequence
    Array(Vec<CodecValue>),

    // Nested message/struct
    Struct(DecodedMessage),
}

impl CodecValue {
    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            CodecValue::Int8(_)
                | CodecValue::Int16(_)
                | CodecValue::Int32(_)
                | CodecValue::Int64(_)
                | CodecValue::UInt8(_)
                | CodecValue::UInt16(_)
                | CodecValue::UInt32(_)
                | CodecValue::UInt64(_)
        )
    }

    /// Check if this value is a floating-point type.
    pub fn is_float(&self) -> bool {
        matches!(self, CodecValue::Float32(_) | CodecValue::Float64(_))
    }

    /// Check if this value is a container type (array or struct).
    pub fn is_container(&self) -> bool {
        matches!(self, CodecValue::Array(_) | CodecValue::Struct(_))
    }

    /// Widen an integer value to `i128`, which holds every integer variant exactly.
    fn as_i128(&self) -> Option<i128> {
        match self {
            CodecValue::Int8(v) => Some(i128::from(*v)),
            CodecValue::Int16(v) => Some(i128::from(*v)),
            CodecValue::Int32(v) => Some(i128::from(*v)),
            CodecValue::Int64(v) => Some(i128::from(*v)),
            CodecValue::UInt8(v) => Some(i128::from(*v)),
            CodecValue::UInt16(v) => Some(i128::from(*v)),
            CodecValue::UInt32(v) => Some(i128::from(*v)),
            CodecValue::UInt64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// Convert an integer value to `T` if it fits.
    ///
    /// Returns `None` for non-integer values and for out-of-range integers.
    pub fn coerce_int<T: TryFrom<i128>>(&self) -> Option<T> {
        self.as_i128().and_then(|v| T::try_from(v).ok())
    }

    /// Convert a numeric value to `f64`.
    ///
    /// `Float64` is returned unchanged, so NaN payloads survive.
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            CodecValue::Float64(v) => Some(*v),
            CodecValue::Float32(v) => Some(f64::from(*v)),
            other => other.as_i128().map(|v| v as f64),
        }
    }

    /// Convert a numeric value to `f32` (precision loss allowed).
    ///
    /// `Float32` is returned unchanged, so NaN payloads survive.
    pub fn coerce_f32(&self) -> Option<f32> {
        match self {
            CodecValue::Float32(v) => Some(*v),
            CodecValue::Float64(v) => Some(*v as f32),
            other => other.as_i128().map(|v| v as f32),
        }
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        self.coerce_int()
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        self.coerce_f64()
    }

    /// Try to get the inner bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CodecValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CodecValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner struct.
    pub fn as_struct(&self) -> Option<&DecodedMessage> {
        match self {
            CodecValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&[CodecValue]> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            CodecValue::Bool(_) => "bool",
            CodecValue::Int8(_) => "int8",
            CodecValue::Int16(_) => "int16",
            CodecValue::Int32(_) => "int32",
            CodecValue::Int64(_) => "int64",
            CodecValue::UInt8(_) => "uint8",
            CodecValue::UInt16(_) => "uint16",
            CodecValue::UInt32(_) => "uint32",
            CodecValue::UInt64(_) => "uint64",
            CodecValue::Float32(_) => "float32",
            CodecValue::Float64(_) => "float64",
            CodecValue::String(_) => "string",
            CodecValue::Array(_) => "array",
            CodecValue::Struct(_) => "struct",
        }
    }

    /// Compare two values, treating floats as equal only when their bit
    /// patterns are identical (so a NaN equals the same NaN, and `0.0` does
    /// not equal `-0.0`).
    pub fn bit_eq(&self, other: &CodecValue) -> bool {
        match (self, other) {
            (CodecValue::Float32(a), CodecValue::Float32(b)) => a.to_bits() == b.to_bits(),
            (CodecValue::Float64(a), CodecValue::Float64(b)) => a.to_bits() == b.to_bits(),
            (CodecValue::Array(a), CodecValue::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.bit_eq(y))
            }
            (CodecValue::Struct(a), CodecValue::Struct(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b.iter())
                        .all(|((na, va), (nb, vb))| na == nb && va.bit_eq(vb))
            }
            _ => self == other,
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for CodecValue {
                fn from(v: $ty) -> Self {
                    CodecValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    DecodedMessage => Struct,
);

impl From<&str> for CodecValue {
    fn from(v: &str) -> Self {
        CodecValue::String(v.to_string())
    }
}

impl<T: Into<CodecValue>> From<Vec<T>> for CodecValue {
    fn from(v: Vec<T>) -> Self {
        CodecValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for CodecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecValue::Bool(v) => write!(f, "{v}"),
            CodecValue::Int8(v) => write!(f, "{v}"),
            CodecValue::Int16(v) => write!(f, "{v}"),
            CodecValue::Int32(v) => write!(f, "{v}"),
            CodecValue::Int64(v) => write!(f, "{v}"),
            CodecValue::UInt8(v) => write!(f, "{v}"),
            CodecValue::UInt16(v) => write!(f, "{v}"),
            CodecValue::UInt32(v) => write!(f, "{v}"),
            CodecValue::UInt64(v) => write!(f, "{v}"),
            CodecValue::Float32(v) => write!(f, "{v}"),
            CodecValue::Float64(v) => write!(f, "{v}"),
            CodecValue::String(v) => write!(f, "{v:?}"),
            CodecValue::Array(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            CodecValue::Struct(msg) => {
                write!(f, "{{")?;
                for (i, (name, v)) in msg.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
