// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use clap::Args;

use super::{page_query, print_json, Context};

#[derive(Debug, Args)]
#[command(after_help = "Examples:\n  aptscan events 0x1 0 --limit 10\n  aptscan events 0x1 0 --start 100")]
pub struct EventsCommand {
    /// Account that owns the event handle
    #[arg(value_name = "ADDRESS")]
    address: String,
    /// Event handle creation number
    #[arg(value_name = "CREATION_NUMBER")]
    creation_number: u64,
    #[arg(long, default_value_t = 25)]
    limit: u64,
    /// Sequence number to start from
    #[arg(long, default_value_t = 0)]
    start: u64,
}

pub(super) async fn run(ctx: &Context, cmd: EventsCommand) -> anyhow::Result<()> {
    let creation_number = cmd.creation_number.to_string();
    let segments = ["accounts", cmd.address.as_str(), "events", creation_number.as_str()];
    let value = ctx
        .client
        .get_json(&segments, &page_query(cmd.limit, cmd.start))
        .await?;
    print_json(&value)
}
