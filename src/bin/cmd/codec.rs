// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode and decode commands - convert between JSON and CDR bytes.

use anyhow::Context as _;
use clap::Args;

use crate::common::{format_hex, parse_hex, GlobalOpts, Result};
use ros2cdr::{CodecFactory, Encoding, JsonCodec};

/// Encode a JSON value to CDR.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// Message type (full, package/Type, or short name)
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// JSON value, e.g. '{"a": 3, "b": 5}'
    #[arg(value_name = "JSON")]
    json: String,
}

impl EncodeCmd {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        let factory = CodecFactory::new(opts.codec_config()?);
        let ty = factory.cdr().schemas().resolve(&self.type_name)?;
        let bytes = factory
            .transcode(self.json.as_bytes(), &ty, Encoding::Json, Encoding::Cdr)
            .with_context(|| format!("encoding {}", ty))?;
        println!("{}", format_hex(&bytes));
        Ok(())
    }
}

/// Decode CDR bytes to JSON.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Message type (full, package/Type, or short name)
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// Hex bytes, e.g. "03 00 00 00 05 00 00 00"
    #[arg(value_name = "HEX")]
    hex: String,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

impl DecodeCmd {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        let factory = CodecFactory::new(opts.codec_config()?);
        let ty = factory.cdr().schemas().resolve(&self.type_name)?;
        let data = parse_hex(&self.hex)?;
        let value = factory
            .get_codec(Encoding::Cdr)
            .decode(&data, &ty)
            .with_context(|| format!("decoding {} bytes as {}", data.len(), ty))?;
        let json = if self.pretty {
            JsonCodec::pretty()
        } else {
            JsonCodec::new()
        };
        println!("{}", json.encode_string(&value)?);
        Ok(())
    }
}
