// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON codec module.
//!
//! Provides schema-guided conversion between JSON documents and values.

pub mod codec;

pub use codec::JsonCodec;
