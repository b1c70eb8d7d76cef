// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Args, Subcommand};

use super::{print_json, Context};

#[derive(Debug, Args)]
pub struct NodeCommand {
    #[command(subcommand)]
    command: NodeSubcommand,
}

#[derive(Debug, Subcommand)]
enum NodeSubcommand {
    /// Ledger info (chain id, epoch, versions)
    Ledger,
    /// OpenAPI document
    Spec,
    /// Health check
    Health,
    /// Node build and configuration info
    Info,
    /// Current gas price estimate
    EstimateGasPrice,
}

pub(super) async fn run(ctx: &Context, cmd: NodeCommand) -> anyhow::Result<()> {
    let segments: &[&str] = match cmd.command {
        NodeSubcommand::Ledger => &[],
        NodeSubcommand::Spec => &["spec.json"],
        NodeSubcommand::Health => &["-", "healthy"],
        NodeSubcommand::Info => &["info"],
        NodeSubcommand::EstimateGasPrice => &["estimate_gas_price"],
    };
    let value = ctx.client.get_json(segments, &[]).await?;
    print_json(&value)
}
