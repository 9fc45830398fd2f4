// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use serde::Serialize;

use ros2cdr::{CodecConfig, IntWidth};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Options shared by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use 64-bit integers for AddTwoInts
    #[arg(long, global = true)]
    pub int64: bool,

    /// Expect and produce the 4-byte encapsulation header
    #[arg(long, global = true)]
    pub framed: bool,

    /// Reject trailing bytes when decoding
    #[arg(long, global = true)]
    pub strict: bool,

    /// Verbose logging to stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Load the configuration file (if any) and apply command-line overrides.
    pub fn codec_config(&self) -> Result<CodecConfig> {
        let mut config = match &self.config {
            Some(path) => CodecConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => CodecConfig::default(),
        };
        if self.int64 {
            config.int_width = IntWidth::Int64;
        }
        config.encapsulation |= self.framed;
        config.strict |= self.strict;
        tracing::debug!(?config, "codec configuration");
        Ok(config)
    }
}

/// Install the stderr log subscriber. `RUST_LOG` refines the default level.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

/// Parse hex bytes, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).with_context(|| format!("invalid hex input '{s}'"))
}

/// Format bytes as space-separated hex pairs.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print `value` as JSON, or run the human-readable printer.
pub fn output_json_or<T>(json: bool, value: &T, human_fn: impl FnOnce() -> Result<()>) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}
