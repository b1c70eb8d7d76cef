// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Outgoing transfers made through the framework's transfer entry points
//!
//! Only direct entry function calls are recognized; transfers made from
//! scripts or other modules are not visible here. Use the reconciliation
//! views for those.

use serde::Serialize;
use serde_json::Value;

use crate::client::LedgerClient;
use crate::config::constants::entry_functions;
use crate::metadata::{format_amount, truncate_address, AssetMetadataCache};
use crate::types::transaction::Transaction;
use crate::value::{inner_or_string, scalar_to_string, PayloadExt};

const ENTRY_FUNCTION_PAYLOAD: &str = "entry_function_payload";

/// A transfer call as submitted, amounts raw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCall {
    pub to: String,
    /// Raw amount in the asset's smallest unit
    pub amount: String,
    /// Coin type tag or fungible asset metadata address
    pub asset: String,
}

/// A transfer ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSend {
    pub from: String,
    pub to: String,
    /// Amount scaled by the asset's decimals
    pub amount: String,
    /// Asset symbol, or its shortened identifier when unknown
    pub asset: String,
    pub version: u64,
}

/// Recognize a transfer entry function call in a user transaction
///
/// `transfer_coins` and `coin::transfer` take `(to, amount)` with the coin
/// type as first type argument; `primary_fungible_store::transfer` takes
/// `(metadata, to, amount)`.
pub fn extract_send_call(tx: &Transaction) -> Option<SendCall> {
    if !tx.is_user_transaction() {
        return None;
    }
    let payload = &tx.payload;
    if payload.string_at(&["type"]) != ENTRY_FUNCTION_PAYLOAD {
        return None;
    }

    let function = payload.string_at(&["function"]);
    let args = payload.get("arguments").and_then(Value::as_array)?;
    let first_type_arg = payload
        .get("type_arguments")
        .and_then(Value::as_array)
        .and_then(|types| types.first())
        .and_then(Value::as_str)
        .unwrap_or_default();

    let call = match function.as_str() {
        entry_functions::TRANSFER_COINS | entry_functions::COIN_TRANSFER => {
            if args.len() < 2 || first_type_arg.is_empty() {
                return None;
            }
            SendCall {
                to: scalar_to_string(&args[0]),
                amount: scalar_to_string(&args[1]),
                asset: first_type_arg.to_string(),
            }
        }
        entry_functions::PRIMARY_STORE_TRANSFER => {
            if args.len() < 3 {
                return None;
            }
            SendCall {
                to: scalar_to_string(&args[1]),
                amount: scalar_to_string(&args[2]),
                asset: inner_or_string(&args[0]),
            }
        }
        _ => return None,
    };

    if call.to.is_empty() || call.amount.is_empty() || call.asset.is_empty() {
        return None;
    }
    Some(call)
}

/// Transfers sent in `txs`, with amounts and assets resolved through `cache`
pub async fn collect_sends<C: LedgerClient + ?Sized>(
    cache: &AssetMetadataCache<C>,
    txs: &[Transaction],
) -> Vec<AccountSend> {
    let mut sends = Vec::new();
    for tx in txs {
        let Some(call) = extract_send_call(tx) else {
            continue;
        };

        let metadata = cache.lookup(&call.asset).await;
        let asset = if metadata.symbol.is_empty() {
            truncate_address(&call.asset)
        } else {
            metadata.symbol.clone()
        };
        sends.push(AccountSend {
            from: tx.sender.clone(),
            to: call.to,
            amount: format_amount(&call.amount, metadata.decimals),
            asset,
            version: tx.version.unwrap_or_default(),
        });
    }
    sends
}
