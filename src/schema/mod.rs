// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type descriptors and the builtin schema table.
//!
//! - [`ast`] - Closed type descriptor ([`FieldType`]) and struct layout ([`MessageType`])
//! - [`builtin_types`] - Hand-declared ROS 2 messages and services
//! - [`table`] - Process-wide, read-only name lookup

pub mod ast;
pub mod builtin_types;
pub mod table;

pub use ast::{align_up, padding_for, Field, FieldType, MessageType, PrimitiveType};
pub use builtin_types::IntWidth;
pub use table::{builtin_schemas, SchemaTable};
