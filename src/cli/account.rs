// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::anyhow;
use clap::{Args, Subcommand};
use serde_json::Value;
use tracing::debug;

use super::{page_query, print_json, Context};
use crate::client::ledger_version_query;
use crate::config::constants::native;
use crate::render::PrettySends;
use crate::sends::collect_sends;
use crate::source_code::{fetch_sources, SourceFilter};
use crate::types::transaction::Transaction;

#[derive(Debug, Args)]
#[command(
    args_conflicts_with_subcommands = true,
    after_help = "Examples:\n  aptscan account 0x1\n  aptscan account resource 0x1 0x1::coin::CoinInfo<0x1::aptos_coin::AptosCoin>\n  aptscan account sends 0x1 --limit 50 --pretty\n  aptscan account source-code 0x1 coin --raw"
)]
pub struct AccountCommand {
    #[command(subcommand)]
    command: Option<AccountSubcommand>,
    /// Account address when no subcommand is given
    #[arg(value_name = "ADDRESS")]
    address: Option<String>,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    /// All resources under an account
    Resources(AddressArgs),
    /// One resource by type
    Resource {
        #[command(flatten)]
        account: AddressArgs,
        /// Fully qualified resource type
        #[arg(value_name = "RESOURCE_TYPE")]
        resource_type: String,
    },
    /// Published modules
    Modules(AddressArgs),
    /// One published module
    Module {
        #[command(flatten)]
        account: AddressArgs,
        #[arg(value_name = "MODULE_NAME")]
        module_name: String,
        /// Print only the ABI
        #[arg(long, conflicts_with = "bytecode")]
        abi: bool,
        /// Print only the bytecode
        #[arg(long)]
        bytecode: bool,
    },
    /// Balance of a coin type or fungible asset (defaults to APT)
    Balance {
        #[command(flatten)]
        account: AddressArgs,
        #[arg(value_name = "ASSET_TYPE")]
        asset_type: Option<String>,
    },
    /// Move source published with package metadata
    SourceCode {
        #[command(flatten)]
        account: AddressArgs,
        /// Only this module
        #[arg(value_name = "MODULE_NAME")]
        module_name: Option<String>,
        /// Only modules of this package
        #[arg(long = "package", value_name = "PACKAGE_NAME")]
        package_name: Option<String>,
        /// Print the source text of the single match instead of JSON
        #[arg(long, default_value_t = false)]
        raw: bool,
    },
    /// Transactions sent by the account
    Txs(PageArgs),
    /// Transfers sent through the framework transfer entry points
    Sends {
        #[arg(value_name = "ADDRESS")]
        address: String,
        /// Maximum number of transactions to scan
        #[arg(long, default_value_t = 25)]
        limit: u64,
        /// Print one aligned line per transfer instead of JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

#[derive(Debug, Args)]
struct AddressArgs {
    #[arg(value_name = "ADDRESS")]
    address: String,
    /// Read at a historical ledger version
    #[arg(long)]
    ledger_version: Option<u64>,
}

#[derive(Debug, Args)]
struct PageArgs {
    #[arg(value_name = "ADDRESS")]
    address: String,
    #[arg(long, default_value_t = 25)]
    limit: u64,
    /// Sequence number to start from
    #[arg(long, default_value_t = 0)]
    start: u64,
}

pub(super) async fn run(ctx: &Context, cmd: AccountCommand) -> anyhow::Result<()> {
    let Some(command) = cmd.command else {
        let address = cmd
            .address
            .ok_or_else(|| anyhow!("missing address or subcommand"))?;
        let value = ctx.client.get_json(&["accounts", address.as_str()], &[]).await?;
        return print_json(&value);
    };

    match command {
        AccountSubcommand::Resources(args) => {
            let value = ctx
                .client
                .get_json(
                    &["accounts", args.address.as_str(), "resources"],
                    &ledger_version_query(args.ledger_version),
                )
                .await?;
            print_json(&value)
        }
        AccountSubcommand::Resource {
            account,
            resource_type,
        } => {
            let value = ctx
                .client
                .get_json(
                    &["accounts", account.address.as_str(), "resource", resource_type.as_str()],
                    &ledger_version_query(account.ledger_version),
                )
                .await?;
            print_json(&value)
        }
        AccountSubcommand::Modules(args) => {
            let value = ctx
                .client
                .get_json(
                    &["accounts", args.address.as_str(), "modules"],
                    &ledger_version_query(args.ledger_version),
                )
                .await?;
            print_json(&value)
        }
        AccountSubcommand::Module {
            account,
            module_name,
            abi,
            bytecode,
        } => {
            let value = ctx
                .client
                .get_json(
                    &["accounts", account.address.as_str(), "module", module_name.as_str()],
                    &ledger_version_query(account.ledger_version),
                )
                .await?;
            if abi {
                print_json(value.get("abi").unwrap_or(&Value::Null))
            } else if bytecode {
                print_json(value.get("bytecode").unwrap_or(&Value::Null))
            } else {
                print_json(&value)
            }
        }
        AccountSubcommand::Balance {
            account,
            asset_type,
        } => {
            let asset_type = asset_type.unwrap_or_else(|| native::COIN_TYPE.to_string());
            let value = ctx
                .client
                .get_json(
                    &["accounts", account.address.as_str(), "balance", asset_type.as_str()],
                    &ledger_version_query(account.ledger_version),
                )
                .await?;
            print_json(&value)
        }
        AccountSubcommand::SourceCode {
            account,
            module_name,
            package_name,
            raw,
        } => {
            let filter = SourceFilter {
                package: package_name.as_deref(),
                module: module_name.as_deref(),
            };
            let sources = fetch_sources(
                ctx.client.as_ref(),
                &account.address,
                filter,
                account.ledger_version,
            )
            .await?;
            if !raw {
                return print_json(&sources);
            }
            match sources.as_slice() {
                [only] => {
                    print!("{}", only.source);
                    Ok(())
                }
                _ => Err(anyhow!(
                    "--raw requires exactly one module match (found {})",
                    sources.len()
                )),
            }
        }
        AccountSubcommand::Txs(args) => {
            let value = ctx
                .client
                .get_json(
                    &["accounts", args.address.as_str(), "transactions"],
                    &page_query(args.limit, args.start),
                )
                .await?;
            print_json(&value)
        }
        AccountSubcommand::Sends {
            address,
            limit,
            pretty,
        } => run_sends(ctx, &address, limit, pretty).await,
    }
}

async fn run_sends(ctx: &Context, address: &str, limit: u64, pretty: bool) -> anyhow::Result<()> {
    let value = ctx
        .client
        .get_json(
            &["accounts", address, "transactions"],
            &page_query(limit, 0),
        )
        .await?;
    let raw = value
        .as_array()
        .ok_or_else(|| anyhow!("unexpected transactions response format"))?;

    let txs: Vec<Transaction> = raw
        .iter()
        .filter_map(|tx| match Transaction::from_value(tx.clone()) {
            Ok(tx) => Some(tx),
            Err(error) => {
                debug!(error = %error, "Skipping undecodable transaction");
                None
            }
        })
        .collect();

    let cache = ctx.metadata_cache();
    let sends = collect_sends(&cache, &txs).await;

    if pretty {
        print!("{}", PrettySends(&sends));
        return Ok(());
    }
    print_json(&sends)
}
