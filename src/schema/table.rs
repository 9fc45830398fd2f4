// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Process-wide schema table.
//!
//! The table is built once, on first use, and never mutated afterwards. It is
//! shared by reference between any number of concurrent encode and decode
//! calls without locking.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::core::{CodecError, Result};
use crate::schema::ast::{FieldType, MessageType};
use crate::schema::builtin_types::{all_builtin_types, IntWidth};

static TABLE_INT32: OnceLock<SchemaTable> = OnceLock::new();
static TABLE_INT64: OnceLock<SchemaTable> = OnceLock::new();

/// Get the builtin schema table for the given service integer width.
pub fn builtin_schemas(width: IntWidth) -> &'static SchemaTable {
    let cell = match width {
        IntWidth::Int32 => &TABLE_INT32,
        IntWidth::Int64 => &TABLE_INT64,
    };
    cell.get_or_init(|| SchemaTable::from_types(all_builtin_types(width)))
}

/// Immutable name → type table.
#[derive(Debug, Clone, Default)]
pub struct SchemaTable {
    types: BTreeMap<String, Arc<MessageType>>,
}

impl SchemaTable {
    /// Build a table from a list of types.
    pub fn from_types(types: impl IntoIterator<Item = Arc<MessageType>>) -> Self {
        Self {
            types: types.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    /// Look up a type by exact name.
    pub fn get(&self, name: &str) -> Option<&Arc<MessageType>> {
        self.types.get(name)
    }

    /// Look up a type by name with variant resolution.
    ///
    /// Tries, in order:
    /// - Exact match
    /// - DDS spelling (`geometry_msgs::msg::dds_::Twist_` → `geometry_msgs/msg/Twist`)
    /// - With `/msg/` or `/srv/` inserted (`geometry_msgs/Twist`)
    /// - Without the interface kind (`geometry_msgs/msg/Twist` → `geometry_msgs/Twist`)
    /// - Short name match (`Twist`, `AddTwoInts_Request`)
    pub fn get_type_variants(&self, name: &str) -> Option<&Arc<MessageType>> {
        if let Some(t) = self.types.get(name) {
            return Some(t);
        }

        let normalized = normalize_name(name);
        if let Some(t) = self.types.get(&normalized) {
            return Some(t);
        }

        let parts: Vec<&str> = normalized.split('/').collect();
        match parts.as_slice() {
            [package, short] => {
                for kind in ["msg", "srv"] {
                    if let Some(t) = self.types.get(&format!("{package}/{kind}/{short}")) {
                        return Some(t);
                    }
                }
                None
            }
            [package, _, short] => self
                .types
                .values()
                .find(|t| t.name.starts_with(&format!("{package}/")) && t.short_name() == *short),
            [short] => self.types.values().find(|t| t.short_name() == *short),
            _ => None,
        }
    }

    /// Resolve a name to a struct field type, or fail with `TypeNotFound`.
    pub fn resolve(&self, name: &str) -> Result<FieldType> {
        self.get_type_variants(name)
            .map(|t| FieldType::Struct(Arc::clone(t)))
            .ok_or_else(|| CodecError::type_not_found(name))
    }

    /// All type names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// All types, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<MessageType>> {
        self.types.values()
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Convert DDS-style names (`pkg::msg::dds_::Type_`) to ROS-style (`pkg/msg/Type`).
fn normalize_name(name: &str) -> String {
    let slashed = name.replace("::", "/");
    if !slashed.split('/').any(|p| p == "dds_") {
        return slashed;
    }
    let parts: Vec<&str> = slashed.split('/').filter(|p| *p != "dds_").collect();
    match parts.split_last() {
        Some((last, head)) => {
            let mut out = head.join("/");
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(last.trim_end_matches('_'));
            out
        }
        None => slashed,
    }
}
