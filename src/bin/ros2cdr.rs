// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # ros2cdr CLI
//!
//! Command-line tool for inspecting and exercising the CDR codec.
//!
//! ## Usage
//!
//! ```sh
//! # List builtin schemas
//! ros2cdr schema list
//!
//! # Show a schema's layout
//! ros2cdr schema show geometry_msgs/msg/Twist
//!
//! # Encode JSON to CDR hex
//! ros2cdr encode AddTwoInts_Request '{"a": 3, "b": 5}'
//!
//! # Decode CDR hex to JSON
//! ros2cdr decode AddTwoInts_Response "08 00 00 00"
//!
//! # Run one AddTwoInts exchange
//! ros2cdr add-two-ints 3 5 --int64
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{AddTwoIntsCmd, DecodeCmd, EncodeCmd, SchemaCmd};
use common::{init_logging, GlobalOpts, Result};

/// ros2cdr - CDR codec for ROS 2 messages and services
#[derive(Parser, Clone)]
#[command(name = "ros2cdr")]
#[command(about = "CDR codec for ROS 2 messages and services", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Schema operations (list, show)
    #[command(subcommand)]
    Schema(SchemaCmd),

    /// Encode a JSON value to CDR hex
    Encode(EncodeCmd),

    /// Decode CDR hex to JSON
    Decode(DecodeCmd),

    /// Run one AddTwoInts request/response exchange
    AddTwoInts(AddTwoIntsCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.opts.verbose);

    match cli.command {
        Commands::Schema(cmd) => cmd.run(&cli.opts),
        Commands::Encode(cmd) => cmd.run(&cli.opts),
        Commands::Decode(cmd) => cmd.run(&cli.opts),
        Commands::AddTwoInts(cmd) => cmd.run(&cli.opts),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
