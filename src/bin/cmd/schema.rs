// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - list and show builtin message schemas.

use clap::Subcommand;
use serde::Serialize;

use crate::common::{output_json_or, GlobalOpts, Result};
use ros2cdr::{FieldType, MessageType};

/// Schema operations.
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// List all builtin message types
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the field layout of a message type
    Show {
        /// Message type (full, package/Type, or short name)
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl SchemaCmd {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        match self {
            SchemaCmd::List { json } => cmd_list(opts, json),
            SchemaCmd::Show { type_name, json } => cmd_show(opts, &type_name, json),
        }
    }
}

fn cmd_list(opts: &GlobalOpts, json: bool) -> Result<()> {
    let config = opts.codec_config()?;
    let items: Vec<SchemaItem> = config
        .schemas()
        .iter()
        .map(|t| SchemaItem {
            name: t.name.clone(),
            fields: t.fields.len(),
            size: FieldType::Struct(t.clone()).fixed_size(),
        })
        .collect();

    output_json_or(json, &items, || {
        for item in &items {
            match item.size {
                Some(size) => println!("{:<45} {:>2} fields  {size} bytes", item.name, item.fields),
                None => println!("{:<45} {:>2} fields  variable", item.name, item.fields),
            }
        }
        Ok(())
    })
}

fn cmd_show(opts: &GlobalOpts, type_name: &str, json: bool) -> Result<()> {
    let config = opts.codec_config()?;
    let ty = config.schemas().resolve(type_name)?;
    let FieldType::Struct(msg_type) = &ty else {
        anyhow::bail!("'{type_name}' is not a message type");
    };

    let layout = layout_of(&ty, msg_type);
    output_json_or(json, &layout, || {
        println!("=== {} ===", layout.name);
        println!();
        println!("{}", msg_type.definition());
        println!();
        println!("alignment: {}", layout.alignment);
        match layout.size {
            Some(size) => println!("size:      {size} bytes"),
            None => println!("size:      variable"),
        }
        Ok(())
    })
}

fn layout_of(ty: &FieldType, msg_type: &MessageType) -> SchemaLayout {
    SchemaLayout {
        name: msg_type.name.clone(),
        alignment: msg_type.alignment(),
        size: ty.fixed_size(),
        fields: msg_type
            .fields
            .iter()
            .map(|f| FieldItem {
                name: f.name.clone(),
                field_type: f.field_type.label(),
            })
            .collect(),
    }
}

// Output types

#[derive(Serialize)]
struct SchemaItem {
    name: String,
    fields: usize,
    size: Option<usize>,
}

#[derive(Serialize)]
struct SchemaLayout {
    name: String,
    alignment: usize,
    size: Option<usize>,
    fields: Vec<FieldItem>,
}

#[derive(Serialize)]
struct FieldItem {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
}
