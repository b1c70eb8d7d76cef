// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Access to an Aptos node.
//!
//! The reconciliation engine only needs three reads from a node: a
//! transaction, a resource snapshot at a ledger version, and a view function
//! call. They are expressed by the [`LedgerClient`] trait so the engine can be
//! driven by the HTTP [`RestClient`] in production and by an in-memory double
//! in tests.

mod rate_limit;
mod rest;
mod retry;

pub use rate_limit::RateLimiter;
pub use rest::RestClient;
pub(crate) use rest::ledger_version_query;
pub use retry::RetryPolicy;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::errors::RpcError;
use crate::types::transaction::{Resource, TransactionRef};

/// Read access to ledger state
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetch the raw transaction JSON identified by `tx_ref`
    async fn fetch_transaction(&self, tx_ref: &TransactionRef) -> Result<Value, RpcError>;

    /// Fetch a resource under `address`
    ///
    /// `version` pins the read to a ledger version; `None` reads current state.
    async fn fetch_resource_at(
        &self,
        address: &str,
        resource_type: &str,
        version: Option<u64>,
    ) -> Result<Resource, RpcError>;

    /// Call a Move view function and return its result values
    async fn invoke_view(&self, request: &ViewRequest) -> Result<Vec<Value>, RpcError>;
}

/// Body of a `POST /view` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRequest {
    /// Fully qualified function, `<address>::<module>::<function>`
    pub function: String,
    /// Generic type arguments
    pub type_arguments: Vec<String>,
    /// Function arguments, JSON encoded
    pub arguments: Vec<Value>,
    /// Ledger version to evaluate at; current state when `None`
    #[serde(skip)]
    pub ledger_version: Option<u64>,
}

impl ViewRequest {
    /// View call to `module_address::module_name::function_name` with no arguments
    pub fn new(module_address: &str, module_name: &str, function_name: &str) -> Self {
        Self {
            function: format!("{module_address}::{module_name}::{function_name}"),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
            ledger_version: None,
        }
    }

    /// View call to an already qualified function identifier
    pub fn for_function(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
            ledger_version: None,
        }
    }

    pub fn with_type_argument(mut self, type_argument: impl Into<String>) -> Self {
        self.type_arguments.push(type_argument.into());
        self
    }

    pub fn with_argument(mut self, argument: impl Into<Value>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn at_version(mut self, version: Option<u64>) -> Self {
        self.ledger_version = version;
        self
    }
}
