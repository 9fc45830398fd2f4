// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Service command - run one AddTwoInts exchange locally.

use clap::Args;
use serde::Serialize;

use crate::common::{format_hex, output_json_or, GlobalOpts, Result};
use ros2cdr::AddTwoIntsService;

/// Encode a request, handle it, and show both payloads.
#[derive(Args, Clone, Debug)]
pub struct AddTwoIntsCmd {
    /// First operand
    #[arg(allow_negative_numbers = true)]
    a: i64,

    /// Second operand
    #[arg(allow_negative_numbers = true)]
    b: i64,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

impl AddTwoIntsCmd {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        let service = AddTwoIntsService::new(opts.codec_config()?);
        let request = service.encode_request(self.a, self.b)?;
        let response = service.handle(&request)?;
        let sum = service.parse_response(&response)?;

        let exchange = Exchange {
            int_width: service.int_width().as_str(),
            request: format_hex(&request),
            response: format_hex(&response),
            sum,
        };
        output_json_or(self.json, &exchange, || {
            println!("request:  {}", exchange.request);
            println!("response: {}", exchange.response);
            println!("sum:      {}", exchange.sum);
            Ok(())
        })
    }
}

#[derive(Serialize)]
struct Exchange {
    int_width: &'static str,
    request: String,
    response: String,
    sum: i64,
}
