// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for aptscan integration tests
//!
//! Provides an in-memory [`LedgerClient`] and transaction fixture builders so
//! reconciliation can be exercised without a node.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use aptscan::config::constants::type_tags;
use aptscan::{
    Event, LedgerClient, Resource, RpcError, Transaction, TransactionRef, ViewRequest,
    WriteSetChange,
};
use async_trait::async_trait;
use serde_json::{json, Value};

/// One recorded call against the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Transaction(TransactionRef),
    Resource {
        address: String,
        resource_type: String,
        version: Option<u64>,
    },
    View {
        function: String,
        arguments: Vec<Value>,
    },
}

/// Mock LedgerClient for testing reconciliation and metadata lookups
///
/// Unknown transactions and resources answer 404; resources and views
/// registered as failing answer 500. Every call is recorded.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockLedgerClient::new()
///     .with_resource("0xstore", type_tags::OBJECT_CORE, json!({ "owner": "0xalice" }))
///     .with_fungible_asset("0xusdc", "USDC", 6);
/// ```
#[derive(Default)]
pub struct MockLedgerClient {
    transactions: HashMap<TransactionRef, Value>,
    resources: HashMap<(String, String), Value>,
    failing_resources: HashSet<(String, String)>,
    views: HashMap<(String, String), Vec<Value>>,
    failing_views: HashSet<(String, String)>,
    view_delay: Option<Duration>,
    resource_delays: HashMap<String, Duration>,
    calls: Mutex<Vec<Call>>,
}

impl MockLedgerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `tx` for `tx_ref`
    pub fn with_transaction(mut self, tx_ref: TransactionRef, tx: Value) -> Self {
        self.transactions.insert(tx_ref, tx);
        self
    }

    /// Serve a resource payload at any ledger version
    pub fn with_resource(mut self, address: &str, resource_type: &str, data: Value) -> Self {
        self.resources
            .insert((address.to_string(), resource_type.to_string()), data);
        self
    }

    /// Serve both resources a store lookup reads
    pub fn with_store(self, store: &str, owner: &str, asset: &str) -> Self {
        self.with_resource(store, type_tags::OBJECT_CORE, json!({ "owner": owner }))
            .with_resource(
                store,
                type_tags::FUNGIBLE_STORE,
                json!({ "metadata": { "inner": asset }, "balance": "0", "frozen": false }),
            )
    }

    /// Answer 500 for this resource
    pub fn with_failing_resource(mut self, address: &str, resource_type: &str) -> Self {
        self.failing_resources
            .insert((address.to_string(), resource_type.to_string()));
        self
    }

    /// Serve a view result for `function` called with `argument` first
    pub fn with_view(mut self, function: &str, argument: &str, result: Vec<Value>) -> Self {
        self.views
            .insert((function.to_string(), argument.to_string()), result);
        self
    }

    /// Serve symbol and decimals view results for a fungible asset
    pub fn with_fungible_asset(self, asset: &str, symbol: &str, decimals: u8) -> Self {
        self.with_view("0x1::fungible_asset::symbol", asset, vec![json!(symbol)])
            .with_view("0x1::fungible_asset::decimals", asset, vec![json!(decimals)])
    }

    /// Answer 500 for this view call
    pub fn with_failing_view(mut self, function: &str, argument: &str) -> Self {
        self.failing_views
            .insert((function.to_string(), argument.to_string()));
        self
    }

    /// Delay every view call, to widen race windows
    pub fn with_view_delay(mut self, delay: Duration) -> Self {
        self.view_delay = Some(delay);
        self
    }

    /// Delay every resource read against `address`, to outlast call timeouts
    pub fn with_resource_delay(mut self, address: &str, delay: Duration) -> Self {
        self.resource_delays.insert(address.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn resource_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Resource { .. }))
            .collect()
    }

    pub fn view_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::View { .. }))
            .count()
    }

    /// Resource reads made against `address`
    pub fn resource_calls_for(&self, address: &str) -> Vec<Call> {
        self.resource_calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Resource { address: a, .. } if a == address))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl LedgerClient for MockLedgerClient {
    async fn fetch_transaction(&self, tx_ref: &TransactionRef) -> Result<Value, RpcError> {
        self.record(Call::Transaction(tx_ref.clone()));
        self.transactions
            .get(tx_ref)
            .cloned()
            .ok_or_else(|| RpcError::not_found(tx_ref.path()))
    }

    async fn fetch_resource_at(
        &self,
        address: &str,
        resource_type: &str,
        version: Option<u64>,
    ) -> Result<Resource, RpcError> {
        self.record(Call::Resource {
            address: address.to_string(),
            resource_type: resource_type.to_string(),
            version,
        });
        if let Some(delay) = self.resource_delays.get(address) {
            tokio::time::sleep(*delay).await;
        }

        let key = (address.to_string(), resource_type.to_string());
        let path = format!("/accounts/{address}/resource/{resource_type}");
        if self.failing_resources.contains(&key) {
            return Err(RpcError::api(500, path, "internal error"));
        }
        self.resources
            .get(&key)
            .map(|data| Resource {
                resource_type: resource_type.to_string(),
                data: data.clone(),
            })
            .ok_or_else(|| RpcError::not_found(path))
    }

    async fn invoke_view(&self, request: &ViewRequest) -> Result<Vec<Value>, RpcError> {
        self.record(Call::View {
            function: request.function.clone(),
            arguments: request.arguments.clone(),
        });
        if let Some(delay) = self.view_delay {
            tokio::time::sleep(delay).await;
        }

        let argument = request
            .arguments
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let key = (request.function.clone(), argument);
        if self.failing_views.contains(&key) {
            return Err(RpcError::api(500, "/view", "view failed"));
        }
        self.views
            .get(&key)
            .cloned()
            .ok_or_else(|| RpcError::api(400, "/view", "function not found"))
    }
}

/// Builder for user transaction fixtures
pub struct TxBuilder {
    tx: Transaction,
}

impl TxBuilder {
    /// Committed user transaction with zero gas
    pub fn user(version: u64, sender: &str) -> Self {
        Self {
            tx: Transaction {
                kind: "user_transaction".to_string(),
                version: Some(version),
                hash: format!("0xhash{version}"),
                sender: sender.to_string(),
                gas_used: "0".to_string(),
                gas_unit_price: "100".to_string(),
                ..Transaction::default()
            },
        }
    }

    pub fn gas(mut self, gas_used: &str, gas_unit_price: &str) -> Self {
        self.tx.gas_used = gas_used.to_string();
        self.tx.gas_unit_price = gas_unit_price.to_string();
        self
    }

    pub fn object_core(mut self, address: &str, owner: &str) -> Self {
        self.tx.changes.push(WriteSetChange::write_resource(
            address,
            type_tags::OBJECT_CORE,
            json!({ "owner": owner, "allow_ungated_transfer": false, "guid_creation_num": "1125899906842625" }),
        ));
        self
    }

    pub fn store(mut self, address: &str, asset: &str, balance: &str) -> Self {
        self.tx.changes.push(WriteSetChange::write_resource(
            address,
            type_tags::FUNGIBLE_STORE,
            json!({ "metadata": { "inner": asset }, "balance": balance, "frozen": false }),
        ));
        self
    }

    /// Store plus its ObjectCore, as written when a primary store changes
    pub fn owned_store(self, address: &str, owner: &str, asset: &str) -> Self {
        self.object_core(address, owner).store(address, asset, "0")
    }

    pub fn withdraw(self, store: &str, amount: &str) -> Self {
        self.event(
            type_tags::WITHDRAW_EVENT,
            json!({ "store": store, "amount": amount }),
        )
    }

    pub fn deposit(self, store: &str, amount: &str) -> Self {
        self.event(
            type_tags::DEPOSIT_EVENT,
            json!({ "store": store, "amount": amount }),
        )
    }

    pub fn event(mut self, type_tag: &str, data: Value) -> Self {
        self.tx.events.push(Event::new(type_tag, data));
        self
    }

    pub fn build(self) -> Transaction {
        self.tx
    }

    pub fn to_json(self) -> Value {
        serde_json::to_value(self.tx).unwrap()
    }
}
