// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod codec;
mod schema;
mod service;

pub use codec::{DecodeCmd, EncodeCmd};
pub use schema::SchemaCmd;
pub use service::AddTwoIntsCmd;
