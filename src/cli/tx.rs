// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, IsTerminal, Read};

use anyhow::{anyhow, Context as _};
use clap::{Args, Subcommand};
use tracing::info;

use super::{page_query, print_json, Context};
use crate::client::LedgerClient;
use crate::errors::ReconcileError;
use crate::render::{graph_assets, PrettyGraph};
use crate::types::transaction::{Transaction, TransactionRef};

#[derive(Debug, Args)]
#[command(
    args_conflicts_with_subcommands = true,
    after_help = "Examples:\n  aptscan tx 2658869495\n  aptscan tx balance-change 2658869495 --aggregate\n  aptscan tx graph 0x<hash> --pretty\n  cat simulated.json | aptscan tx balance-change"
)]
pub struct TxCommand {
    #[command(subcommand)]
    command: Option<TxSubcommand>,
    /// Version or hash when no subcommand is given
    #[arg(value_name = "VERSION_OR_HASH")]
    version_or_hash: Option<String>,
}

#[derive(Debug, Subcommand)]
enum TxSubcommand {
    /// Recent transactions
    List {
        #[arg(long, default_value_t = 25)]
        limit: u64,
        /// Ledger version to start from
        #[arg(long, default_value_t = 0)]
        start: u64,
    },
    /// Gas fee, withdraws and deposits of one transaction
    BalanceChange {
        #[command(flatten)]
        target: TargetArgs,
        /// Net change per account and asset instead of individual entries
        #[arg(long, default_value_t = false)]
        aggregate: bool,
    },
    /// Withdraws and deposits of one transaction, without gas
    Transfers {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Sender → receiver transfer graph of one transaction
    Graph {
        #[command(flatten)]
        target: TargetArgs,
        /// Render as text with symbols and decimal amounts
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

/// Transaction to analyze; read from stdin as JSON when piped
#[derive(Debug, Args)]
struct TargetArgs {
    #[arg(value_name = "VERSION_OR_HASH")]
    version_or_hash: Option<String>,
}

pub(super) async fn run(ctx: &Context, cmd: TxCommand) -> anyhow::Result<()> {
    let Some(command) = cmd.command else {
        let tx_ref = cmd
            .version_or_hash
            .ok_or_else(|| anyhow!("missing version/hash or subcommand"))?;
        let value = ctx
            .client
            .fetch_transaction(&TransactionRef::parse(&tx_ref))
            .await?;
        return print_json(&value);
    };

    match command {
        TxSubcommand::List { limit, start } => {
            let value = ctx
                .client
                .get_json(&["transactions"], &page_query(limit, start))
                .await?;
            print_json(&value)
        }
        TxSubcommand::BalanceChange { target, aggregate } => {
            let (tx, version) = load_transaction(ctx, target).await?;
            let reconciler = ctx.reconciler();
            if aggregate {
                print_json(&reconciler.reconcile_aggregated(&tx, version).await)
            } else {
                print_json(&reconciler.reconcile(&tx, version).await)
            }
        }
        TxSubcommand::Transfers { target } => {
            let (tx, version) = load_transaction(ctx, target).await?;
            print_json(&ctx.reconciler().transfers(&tx, version).await)
        }
        TxSubcommand::Graph { target, pretty } => {
            let (tx, version) = load_transaction(ctx, target).await?;
            let graph = ctx.reconciler().build_transfer_graph(&tx, version).await;
            if !pretty {
                return print_json(&graph);
            }

            let metadata = ctx
                .metadata_cache()
                .lookup_many(graph_assets(&graph))
                .await;
            print!("{}", PrettyGraph::new(&graph, &metadata));
            Ok(())
        }
    }
}

/// Piped transaction JSON if stdin is not a terminal and not empty
///
/// The read runs on the blocking pool so a slow producer does not stall
/// the runtime worker.
async fn read_stdin_transaction() -> anyhow::Result<Option<Transaction>> {
    if io::stdin().is_terminal() {
        return Ok(None);
    }

    let input = tokio::task::spawn_blocking(|| {
        let mut input = String::new();
        io::stdin().lock().read_to_string(&mut input).map(|_| input)
    })
    .await
    .context("stdin reader task failed")?
    .context("failed to read transaction from stdin")?;
    parse_piped_transaction(&input)
}

/// Blank input means nothing was piped
fn parse_piped_transaction(input: &str) -> anyhow::Result<Option<Transaction>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(Transaction::from_json_str(input)?))
}

/// Transaction to analyze with the version stores resolve against
///
/// Piped transactions (e.g. simulation output) are used as-is; without a
/// version they resolve against current state. Otherwise the reference is
/// fetched and must be committed.
async fn load_transaction(ctx: &Context, target: TargetArgs) -> anyhow::Result<(Transaction, u64)> {
    if let Some(tx) = read_stdin_transaction().await? {
        let version = tx.version.unwrap_or_default();
        info!(version, "Using transaction from stdin");
        return Ok((tx, version));
    }

    let tx_ref = target
        .version_or_hash
        .ok_or(ReconcileError::MissingTransaction)?;
    let fetched = ctx
        .reconciler()
        .fetch_transaction(&TransactionRef::parse(&tx_ref))
        .await?;
    Ok(fetched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pipe_is_not_a_transaction() {
        assert!(parse_piped_transaction("").unwrap().is_none());
        assert!(parse_piped_transaction(" \n\t").unwrap().is_none());
    }

    #[test]
    fn test_piped_transaction_is_parsed() {
        let tx = parse_piped_transaction(
            r#"{"type": "user_transaction", "version": "42", "hash": "0xfeed", "sender": "0x1"}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(tx.version, Some(42));
        assert!(tx.is_user_transaction());
    }

    #[test]
    fn test_malformed_pipe_is_an_error() {
        assert!(parse_piped_transaction("{not json").is_err());
    }
}
