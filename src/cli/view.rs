// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context as _;
use clap::Args;
use serde_json::Value;

use super::{print_json, Context};
use crate::client::{LedgerClient, ViewRequest};

#[derive(Debug, Args)]
#[command(
    after_help = "Example:\n  aptscan view 0x1::coin::balance --type-args 0x1::aptos_coin::AptosCoin --args '\"0x1\"'"
)]
pub struct ViewCommand {
    /// Fully qualified function, e.g. 0x1::coin::balance
    function: String,
    /// Type argument (repeatable)
    #[arg(long = "type-args")]
    type_args: Vec<String>,
    /// JSON-encoded argument (repeatable)
    #[arg(long = "args")]
    args: Vec<String>,
    /// Evaluate at a historical ledger version
    #[arg(long)]
    ledger_version: Option<u64>,
}

pub(super) async fn run(ctx: &Context, cmd: ViewCommand) -> anyhow::Result<()> {
    let mut request = ViewRequest::for_function(cmd.function).at_version(cmd.ledger_version);
    for type_arg in cmd.type_args {
        request = request.with_type_argument(type_arg);
    }
    for arg in &cmd.args {
        let parsed: Value = serde_json::from_str(arg)
            .with_context(|| format!("failed to parse argument {arg:?} as JSON"))?;
        request = request.with_argument(parsed);
    }

    let values = ctx.client.invoke_view(&request).await?;
    print_json(&values)
}
