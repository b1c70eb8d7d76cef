// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::anyhow;
use clap::{Args, Subcommand};

use super::{print_json, Context};

#[derive(Debug, Args)]
#[command(
    args_conflicts_with_subcommands = true,
    after_help = "Examples:\n  aptscan block 1000\n  aptscan block 1000 --with-transactions\n  aptscan block by-version 4300326632"
)]
pub struct BlockCommand {
    #[command(subcommand)]
    command: Option<BlockSubcommand>,
    /// Block height used when no subcommand is given
    #[arg(value_name = "HEIGHT")]
    height: Option<u64>,
    /// Include full transactions
    #[arg(long, default_value_t = false)]
    with_transactions: bool,
}

#[derive(Debug, Subcommand)]
enum BlockSubcommand {
    /// Block containing a ledger version
    ByVersion {
        #[arg(value_name = "VERSION")]
        version: u64,
        /// Include full transactions
        #[arg(long, default_value_t = false)]
        with_transactions: bool,
    },
}

pub(super) async fn run(ctx: &Context, cmd: BlockCommand) -> anyhow::Result<()> {
    let (segments, with_transactions) = match cmd.command {
        Some(BlockSubcommand::ByVersion {
            version,
            with_transactions,
        }) => (
            ["blocks".to_string(), "by_version".to_string(), version.to_string()],
            with_transactions,
        ),
        None => {
            let height = cmd
                .height
                .ok_or_else(|| anyhow!("missing block height or subcommand"))?;
            (
                ["blocks".to_string(), "by_height".to_string(), height.to_string()],
                cmd.with_transactions,
            )
        }
    };

    let query = [("with_transactions", with_transactions.to_string())];
    let value = ctx.client.get_json(&segments, &query).await?;
    print_json(&value)
}
