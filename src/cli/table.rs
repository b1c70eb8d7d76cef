// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use super::{print_json, Context};

#[derive(Debug, Args)]
pub struct TableCommand {
    #[command(subcommand)]
    command: TableSubcommand,
}

#[derive(Debug, Subcommand)]
enum TableSubcommand {
    /// Read a table item by key
    #[command(
        after_help = "Example:\n  aptscan table item <handle> --key-type address --value-type u64 --key '\"0x1\"'"
    )]
    Item {
        /// Table handle
        #[arg(value_name = "TABLE_HANDLE")]
        handle: String,
        /// Move type of the key
        #[arg(long)]
        key_type: String,
        /// Move type of the value
        #[arg(long)]
        value_type: String,
        /// JSON-encoded key
        #[arg(long)]
        key: String,
    },
}

pub(super) async fn run(ctx: &Context, cmd: TableCommand) -> anyhow::Result<()> {
    match cmd.command {
        TableSubcommand::Item {
            handle,
            key_type,
            value_type,
            key,
        } => {
            let key: Value = serde_json::from_str(&key)
                .with_context(|| format!("failed to parse key as JSON: {key}"))?;
            let body = json!({
                "key_type": key_type,
                "value_type": value_type,
                "key": key,
            });
            let value = ctx
                .client
                .post_json(&["tables", handle.as_str(), "item"], &[], &body)
                .await?;
            print_json(&value)
        }
    }
}
