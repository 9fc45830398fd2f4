// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Predefined ROS 2 types used by the bridge.
//!
//! ## Supported Types
//!
//! - `geometry_msgs/msg/Vector3` - three float64 components
//! - `geometry_msgs/msg/Twist` - linear and angular Vector3
//! - `example_interfaces/srv/AddTwoInts_Request` - two integers
//! - `example_interfaces/srv/AddTwoInts_Response` - their sum
//!
//! ```text
//! # AddTwoInts.srv
//! int32 a
//! int32 b
//! ---
//! int32 sum
//! ```
//!
//! The integer width of the arithmetic service is a deployment choice: both
//! peers must agree on it. [`IntWidth::Int32`] is the default; the upstream
//! `example_interfaces` package declares `int64`, selectable with
//! [`IntWidth::Int64`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::schema::ast::{FieldType, MessageType, PrimitiveType};

/// Full name of the Vector3 message.
pub const VECTOR3: &str = "geometry_msgs/msg/Vector3";
/// Full name of the Twist message.
pub const TWIST: &str = "geometry_msgs/msg/Twist";
/// Full name of the AddTwoInts request.
pub const ADD_TWO_INTS_REQUEST: &str = "example_interfaces/srv/AddTwoInts_Request";
/// Full name of the AddTwoInts response.
pub const ADD_TWO_INTS_RESPONSE: &str = "example_interfaces/srv/AddTwoInts_Response";

/// Integer width of the AddTwoInts request and response fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntWidth {
    /// 32-bit signed integers (8-byte request, 4-byte response)
    #[default]
    Int32,
    /// 64-bit signed integers (16-byte request, 8-byte response)
    Int64,
}

impl IntWidth {
    /// Primitive type for this width.
    pub fn primitive(self) -> PrimitiveType {
        match self {
            IntWidth::Int32 => PrimitiveType::Int32,
            IntWidth::Int64 => PrimitiveType::Int64,
        }
    }

    /// Parse from string ("int32"/"i32", "int64"/"i64").
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "int32" | "i32" | "32" => Some(IntWidth::Int32),
            "int64" | "i64" | "64" => Some(IntWidth::Int64),
            _ => None,
        }
    }

    /// Get string representation.
    pub fn as_str(self) -> &'static str {
        self.primitive().name()
    }
}

/// Create the geometry_msgs/msg/Vector3 type.
pub fn vector3() -> MessageType {
    MessageType::new(VECTOR3)
        .with_field("x", FieldType::Primitive(PrimitiveType::Float64))
        .with_field("y", FieldType::Primitive(PrimitiveType::Float64))
        .with_field("z", FieldType::Primitive(PrimitiveType::Float64))
}

/// Create the geometry_msgs/msg/Twist type around a shared Vector3 descriptor.
pub fn twist(vector3: Arc<MessageType>) -> MessageType {
    MessageType::new(TWIST)
        .with_field("linear", FieldType::Struct(Arc::clone(&vector3)))
        .with_field("angular", FieldType::Struct(vector3))
}

/// Create the example_interfaces/srv/AddTwoInts request type.
pub fn add_two_ints_request(width: IntWidth) -> MessageType {
    MessageType::new(ADD_TWO_INTS_REQUEST)
        .with_field("a", FieldType::Primitive(width.primitive()))
        .with_field("b", FieldType::Primitive(width.primitive()))
}

/// Create the example_interfaces/srv/AddTwoInts response type.
pub fn add_two_ints_response(width: IntWidth) -> MessageType {
    MessageType::new(ADD_TWO_INTS_RESPONSE)
        .with_field("sum", FieldType::Primitive(width.primitive()))
}

/// Get all builtin types for the given service integer width.
pub fn all_builtin_types(width: IntWidth) -> Vec<Arc<MessageType>> {
    let vector3 = Arc::new(vector3());
    vec![
        Arc::clone(&vector3),
        Arc::new(twist(vector3)),
        Arc::new(add_two_ints_request(width)),
        Arc::new(add_two_ints_response(width)),
    ]
}
