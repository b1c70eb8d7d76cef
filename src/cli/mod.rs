// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Command line surface.
//!
//! Most commands are passthroughs that fetch one REST document and print it.
//! The `tx balance-change`, `tx transfers`, `tx graph` and `account sends`
//! commands go through the reconciliation engine and metadata cache.

mod account;
mod block;
mod events;
mod node;
mod table;
mod tx;
mod view;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::client::RestClient;
use crate::errors::RpcError;
use crate::metadata::AssetMetadataCache;
use crate::reconcile::Reconciler;
use crate::AptscanConfig;

/// Aptos ledger explorer with transaction effect reconciliation
#[derive(Debug, Parser)]
#[command(name = "aptscan", version, about, long_about = None)]
pub struct Cli {
    /// Node REST endpoint, e.g. https://api.mainnet.aptoslabs.com/v1
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Node and ledger information
    Node(node::NodeCommand),
    /// Account state, transactions and sends
    Account(account::AccountCommand),
    /// Blocks by height or version
    Block(block::BlockCommand),
    /// Events from an event handle
    Events(events::EventsCommand),
    /// Table items
    Table(table::TableCommand),
    /// Call a view function
    View(view::ViewCommand),
    /// Transactions and their balance effects
    Tx(tx::TxCommand),
}

/// Everything a command needs to talk to the node
pub(crate) struct Context {
    pub(crate) client: Arc<RestClient>,
    pub(crate) config: AptscanConfig,
}

impl Context {
    pub(crate) fn new(config: AptscanConfig) -> Result<Self, RpcError> {
        let client = Arc::new(RestClient::new(&config)?);
        Ok(Self { client, config })
    }

    pub(crate) fn reconciler(&self) -> Reconciler<RestClient> {
        Reconciler::new(Arc::clone(&self.client), &self.config)
    }

    pub(crate) fn metadata_cache(&self) -> AssetMetadataCache<RestClient> {
        AssetMetadataCache::new(Arc::clone(&self.client))
    }
}

/// Run one parsed command against the node in `config`
pub async fn execute(command: Command, config: AptscanConfig) -> anyhow::Result<()> {
    let ctx = Context::new(config)?;
    match command {
        Command::Node(cmd) => node::run(&ctx, cmd).await,
        Command::Account(cmd) => account::run(&ctx, cmd).await,
        Command::Block(cmd) => block::run(&ctx, cmd).await,
        Command::Events(cmd) => events::run(&ctx, cmd).await,
        Command::Table(cmd) => table::run(&ctx, cmd).await,
        Command::View(cmd) => view::run(&ctx, cmd).await,
        Command::Tx(cmd) => tx::run(&ctx, cmd).await,
    }
}

/// Pretty-print `value` as JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `limit` plus `start` when past the first page
pub(crate) fn page_query(limit: u64, start: u64) -> Vec<(&'static str, String)> {
    let mut query = vec![("limit", limit.to_string())];
    if start > 0 {
        query.push(("start", start.to_string()));
    }
    query
}
