// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # ros2cdr
//!
//! CDR codec for the ROS 2 messages and services carried over keyed-messaging
//! bridges.
//!
//! The library is organized into:
//! - `core/` - Errors and the dynamic value model
//! - `schema/` - Type descriptors and the builtin schema table
//! - `encoding/` - CDR and JSON codecs
//! - [`msg`], [`srv`] - Typed messages
//! - [`service`] - The AddTwoInts request handler
//! - [`config`] - TOML configuration
//!
//! ## Wire format
//!
//! Plain CDR, little-endian. Every primitive is aligned to its own size,
//! measured from the start of the payload, with zero padding. Strings carry a
//! u32 byte count that includes a zero terminator; sequences carry a u32
//! element count; fixed arrays carry nothing. Nested structs do not reset
//! the alignment origin.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ros2cdr::msg::{CdrMessage, Twist, Vector3};
//!
//! let twist = Twist::new(Vector3::new(0.5, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.2));
//! let bytes = twist.encode()?;
//! assert_eq!(bytes.len(), 48);
//! assert_eq!(Twist::decode(&bytes)?, twist);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: dynamic values
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ros2cdr::{CdrCodec, CodecValue, DecodedMessage};
//!
//! let codec = CdrCodec::new();
//! let request = CodecValue::Struct(DecodedMessage::new().with("a", 3).with("b", 5));
//! let bytes = codec.encode_named("example_interfaces/srv/AddTwoInts_Request", &request)?;
//! assert_eq!(bytes, [3, 0, 0, 0, 5, 0, 0, 0]);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use crate::core::{CodecError, CodecValue, DecodedMessage, Encoding, ErrorKind, Result};

// Encoding/decoding
pub mod encoding;

pub use encoding::{CdrCodec, CodecFactory, JsonCodec, MessageCodec};

// Type descriptors
pub mod schema;

pub use schema::{builtin_schemas, FieldType, IntWidth, MessageType, PrimitiveType, SchemaTable};

pub mod config;

pub use config::CodecConfig;

// Typed messages and services
pub mod msg;
pub mod service;
pub mod srv;

pub use msg::{CdrMessage, Twist, Vector3};
pub use service::AddTwoIntsService;
pub use srv::{AddTwoIntsRequest, AddTwoIntsResponse};
