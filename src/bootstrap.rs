// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use tracing::debug;

use crate::cli::{execute, Cli};
use crate::AptscanConfig;

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Environment (and .env) first, then command line overrides
    let mut config = AptscanConfig::from_env()?;
    if let Some(rpc_url) = cli.rpc_url {
        config.node_url = rpc_url;
    }
    debug!(node_url = %config.node_url, "Loaded configuration");

    execute(cli.command, config).await
}
