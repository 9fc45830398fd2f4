// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type descriptors for CDR messages.
//!
//! A [`FieldType`] is a closed tagged variant: every encodable shape is one of
//! its cases, and the encoder, decoder and size calculator dispatch on it with
//! a `match`. Struct descriptors are shared through `Arc` so that a type such
//! as `Vector3` can be nested several times without copying its field list.

use std::fmt;
use std::sync::Arc;

/// A message type definition with its ordered fields.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageType {
    /// Type name including package (e.g. "geometry_msgs/msg/Vector3")
    pub name: String,
    /// Ordered list of fields
    pub fields: Vec<Field>,
}

/// A field in a message type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field type
    pub field_type: FieldType,
}

/// Field type - primitive, string, array, sequence or nested struct.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Fixed-width scalar
    Primitive(PrimitiveType),
    /// UTF-8 string with length prefix and terminator
    String,
    /// UTF-16 string with length prefix (in code units) and terminator
    WString,
    /// Fixed-size array; the length is part of the schema, not the wire data
    Array {
        /// Element type
        element: Box<FieldType>,
        /// Number of elements
        len: usize,
    },
    /// Variable-size sequence with a 4-byte element count prefix
    Sequence(Box<FieldType>),
    /// Nested struct
    Struct(Arc<MessageType>),
}

/// Primitive CDR types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean (one byte, 0 or 1)
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
}

impl PrimitiveType {
    /// Size in bytes on the wire.
    pub fn size(self) -> usize {
        match self {
            PrimitiveType::Bool | PrimitiveType::Int8 | PrimitiveType::UInt8 => 1,
            PrimitiveType::Int16 | PrimitiveType::UInt16 => 2,
            PrimitiveType::Int32 | PrimitiveType::UInt32 | PrimitiveType::Float32 => 4,
            PrimitiveType::Int64 | PrimitiveType::UInt64 | PrimitiveType::Float64 => 8,
        }
    }

    /// Alignment requirement; CDR aligns every scalar to its own size.
    pub fn alignment(self) -> usize {
        self.size()
    }

    /// ROS interface name of this type.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::UInt8 => "uint8",
            PrimitiveType::UInt16 => "uint16",
            PrimitiveType::UInt32 => "uint32",
            PrimitiveType::UInt64 => "uint64",
            PrimitiveType::Float32 => "float32",
            PrimitiveType::Float64 => "float64",
        }
    }

    /// Parse a primitive type from a ROS interface name.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" | "boolean" => Some(PrimitiveType::Bool),
            "int8" | "char" => Some(PrimitiveType::Int8),
            "int16" => Some(PrimitiveType::Int16),
            "int32" => Some(PrimitiveType::Int32),
            "int64" => Some(PrimitiveType::Int64),
            "uint8" | "byte" => Some(PrimitiveType::UInt8),
            "uint16" => Some(PrimitiveType::UInt16),
            "uint32" => Some(PrimitiveType::UInt32),
            "uint64" => Some(PrimitiveType::UInt64),
            "float32" | "float" => Some(PrimitiveType::Float32),
            "float64" | "double" => Some(PrimitiveType::Float64),
            _ => None,
        }
    }
}

impl FieldType {
    /// Shorthand for a primitive field type.
    pub fn primitive(prim: PrimitiveType) -> Self {
        FieldType::Primitive(prim)
    }

    /// Shorthand for a fixed-size array.
    pub fn array(element: FieldType, len: usize) -> Self {
        FieldType::Array {
            element: Box::new(element),
            len,
        }
    }

    /// Shorthand for a sequence.
    pub fn sequence(element: FieldType) -> Self {
        FieldType::Sequence(Box::new(element))
    }

    /// Alignment of the first scalar written for a value of this type.
    ///
    /// Strings and sequences start with a 4-byte prefix. A fixed array aligns
    /// like its element. A struct aligns like its first field; an empty
    /// struct has alignment 1.
    pub fn alignment(&self) -> usize {
        match self {
            FieldType::Primitive(p) => p.alignment(),
            FieldType::String | FieldType::WString | FieldType::Sequence(_) => 4,
            FieldType::Array { element, len } => {
                if *len == 0 {
                    1
                } else {
                    element.alignment()
                }
            }
            FieldType::Struct(msg) => msg.alignment(),
        }
    }

    /// Encoded size when it does not depend on the value.
    ///
    /// `None` for strings, sequences and anything containing them. Because
    /// padding depends on the starting offset, the size is only exact for
    /// values that start at an offset aligned to [`FieldType::alignment`]
    /// and whose fields never need inner padding; for the built-in schemas
    /// both hold.
    pub fn fixed_size(&self) -> Option<usize> {
        let mut offset = 0usize;
        self.accumulate_fixed(&mut offset)?;
        Some(offset)
    }

    fn accumulate_fixed(&self, offset: &mut usize) -> Option<()> {
        match self {
            FieldType::Primitive(p) => {
                *offset = align_up(*offset, p.alignment()) + p.size();
                Some(())
            }
            FieldType::String | FieldType::WString | FieldType::Sequence(_) => None,
            FieldType::Array { element, len } => {
                for _ in 0..*len {
                    element.accumulate_fixed(offset)?;
                }
                Some(())
            }
            FieldType::Struct(msg) => {
                for field in &msg.fields {
                    field.field_type.accumulate_fixed(offset)?;
                }
                Some(())
            }
        }
    }

    /// Human-readable type label (e.g. `float64[3]`, `sequence<string>`).
    pub fn label(&self) -> String {
        match self {
            FieldType::Primitive(p) => p.name().to_string(),
            FieldType::String => "string".to_string(),
            FieldType::WString => "wstring".to_string(),
            FieldType::Array { element, len } => format!("{}[{len}]", element.label()),
            FieldType::Sequence(element) => format!("sequence<{}>", element.label()),
            FieldType::Struct(msg) => msg.name.clone(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl MessageType {
    /// Create a new message type with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field at the end of the field list.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Builder-style field append.
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.add_field(Field {
            name: name.into(),
            field_type,
        });
        self
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Alignment of this struct: that of its first field, 1 when empty.
    pub fn alignment(&self) -> usize {
        self.fields
            .first()
            .map(|f| f.field_type.alignment())
            .unwrap_or(1)
    }

    /// Short name without package (e.g. "Vector3").
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Render the field list in ROS `.msg` style, one field per line.
    pub fn definition(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("{} {}", f.field_type.label(), f.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Round `offset` up to the next multiple of `alignment`.
#[inline]
pub fn align_up(offset: usize, alignment: usize) -> usize {
    offset + padding_for(offset, alignment)
}

/// Padding bytes needed to bring `offset` to a multiple of `alignment`.
#[inline]
pub fn padding_for(offset: usize, alignment: usize) -> usize {
    if alignment <= 1 {
        0
    } else {
        (alignment - offset % alignment) % alignment
    }
}
