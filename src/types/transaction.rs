// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction input model
//!
//! Only the fields the reconciliation engine reads are modelled; everything
//! else in the REST payload is ignored. Numeric fields are accepted both as
//! JSON numbers and as decimal strings, since the node returns the latter and
//! hand-written fixtures often use the former.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::constants::{transaction_kinds, WRITE_RESOURCE_CHANGE};
use crate::errors::ReconcileError;
use crate::value::{parse_u64, scalar_to_string, PayloadExt};

static NULL: Value = Value::Null;

/// How a caller identifies a transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionRef {
    /// Committed ledger version
    Version(u64),
    /// Transaction content hash
    Hash(String),
}

impl TransactionRef {
    /// Interpret `input` as a version if it parses as an unsigned integer, else as a hash
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<u64>() {
            Ok(version) => TransactionRef::Version(version),
            Err(_) => TransactionRef::Hash(trimmed.to_string()),
        }
    }

    /// REST path that fetches this transaction
    pub fn path(&self) -> String {
        match self {
            TransactionRef::Version(version) => format!("/transactions/by_version/{version}"),
            TransactionRef::Hash(hash) => format!("/transactions/by_hash/{hash}"),
        }
    }
}

impl std::fmt::Display for TransactionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionRef::Version(version) => write!(f, "version {version}"),
            TransactionRef::Hash(hash) => write!(f, "hash {hash}"),
        }
    }
}

/// One transaction as returned by the node (or piped in from a simulation)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction kind, e.g. `user_transaction`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Committed ledger version; absent for pending and simulated transactions
    #[serde(default, deserialize_with = "lenient_u64")]
    pub version: Option<u64>,
    /// Content hash
    #[serde(default)]
    pub hash: String,
    /// Sending account (user transactions only)
    #[serde(default)]
    pub sender: String,
    /// Gas units consumed
    #[serde(default, deserialize_with = "lenient_string")]
    pub gas_used: String,
    /// Octas paid per gas unit
    #[serde(default, deserialize_with = "lenient_string")]
    pub gas_unit_price: String,
    /// Transaction payload (entry function call, script, ...)
    #[serde(default)]
    pub payload: Value,
    /// Write-set changes, in execution order
    #[serde(default)]
    pub changes: Vec<WriteSetChange>,
    /// Emitted events, in execution order
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Transaction {
    /// Parse a transaction from its JSON representation
    pub fn from_value(value: Value) -> Result<Self, ReconcileError> {
        if !value.is_object() {
            return Err(ReconcileError::malformed("transaction JSON must be an object"));
        }
        serde_json::from_value(value).map_err(|e| ReconcileError::malformed(e.to_string()))
    }

    /// Parse a transaction from raw JSON text
    pub fn from_json_str(input: &str) -> Result<Self, ReconcileError> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| ReconcileError::malformed(e.to_string()))?;
        Self::from_value(value)
    }

    /// True unless the node reports the transaction as pending or it has no version
    pub fn is_committed(&self) -> bool {
        self.kind != transaction_kinds::PENDING && self.version.is_some()
    }

    /// True for transactions submitted by a user account
    pub fn is_user_transaction(&self) -> bool {
        self.kind == transaction_kinds::USER
    }
}

/// A single state mutation attached to a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteSetChange {
    /// Change kind, e.g. `write_resource` or `delete_resource`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Address the change applies to
    #[serde(default)]
    pub address: String,
    /// Change body; for resource writes `{ "type": <tag>, "data": <payload> }`
    #[serde(default)]
    pub data: Value,
}

impl WriteSetChange {
    /// Build a resource write, mostly useful for fixtures
    pub fn write_resource(
        address: impl Into<String>,
        resource_type: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            kind: WRITE_RESOURCE_CHANGE.to_string(),
            address: address.into(),
            data: serde_json::json!({ "type": resource_type.into(), "data": payload }),
        }
    }

    /// True for `write_resource` changes
    pub fn is_resource_write(&self) -> bool {
        self.kind == WRITE_RESOURCE_CHANGE
    }

    /// Resource type tag written by this change (empty if not a resource write)
    pub fn resource_type(&self) -> &str {
        self.data.get("type").and_then(Value::as_str).unwrap_or_default()
    }

    /// Resource payload written by this change
    pub fn resource_payload(&self) -> &Value {
        self.data.get("data").unwrap_or(&NULL)
    }
}

/// An event emitted during execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event type tag
    #[serde(rename = "type", default)]
    pub type_tag: String,
    /// Event payload
    #[serde(default)]
    pub data: Value,
}

impl Event {
    /// Build an event, mostly useful for fixtures
    pub fn new(type_tag: impl Into<String>, data: Value) -> Self {
        Self {
            type_tag: type_tag.into(),
            data,
        }
    }

    /// String field of the payload, empty if absent
    pub fn field(&self, key: &str) -> String {
        self.data.string_at(&[key])
    }
}

/// A resource snapshot fetched from ledger state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource type tag
    #[serde(rename = "type", default)]
    pub resource_type: String,
    /// Resource payload
    #[serde(default)]
    pub data: Value,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(scalar_to_string).unwrap_or_default())
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_ref_parse() {
        assert_eq!(TransactionRef::parse("123"), TransactionRef::Version(123));
        assert_eq!(
            TransactionRef::parse(" 0xabc "),
            TransactionRef::Hash("0xabc".to_string())
        );
        assert_eq!(
            TransactionRef::Version(5).path(),
            "/transactions/by_version/5"
        );
        assert_eq!(
            TransactionRef::Hash("0x1".into()).path(),
            "/transactions/by_hash/0x1"
        );
    }

    #[test]
    fn test_parse_rest_shape() {
        let tx = Transaction::from_value(json!({
            "type": "user_transaction",
            "version": "2000",
            "hash": "0xfeed",
            "sender": "0x1",
            "gas_used": "1000",
            "gas_unit_price": 100,
            "changes": [{
                "type": "write_resource",
                "address": "0xs1",
                "data": {"type": "0x1::object::ObjectCore", "data": {"owner": "0xowner"}}
            }],
            "events": [{"type": "0x1::fungible_asset::Deposit", "data": {"store": "0xs1", "amount": "5"}}],
            "signature": {"type": "ed25519_signature"}
        }))
        .unwrap();

        assert_eq!(tx.version, Some(2000));
        assert_eq!(tx.gas_used, "1000");
        assert_eq!(tx.gas_unit_price, "100");
        assert!(tx.is_committed());
        assert!(tx.is_user_transaction());
        assert_eq!(tx.changes[0].resource_type(), "0x1::object::ObjectCore");
        assert_eq!(tx.changes[0].resource_payload().string_at(&["owner"]), "0xowner");
        assert_eq!(tx.events[0].field("amount"), "5");
    }

    #[test]
    fn test_pending_is_not_committed() {
        let tx = Transaction::from_value(json!({"type": "pending_transaction", "hash": "0x1"}))
            .unwrap();
        assert!(!tx.is_committed());
        assert_eq!(tx.version, None);
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(matches!(
            Transaction::from_value(json!([1, 2])),
            Err(ReconcileError::MalformedTransaction { .. })
        ));
        assert!(Transaction::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_non_resource_change_has_empty_type() {
        let change = WriteSetChange {
            kind: "write_table_item".into(),
            address: String::new(),
            data: json!({"key": "0x1", "value": "0x2"}),
        };
        assert!(!change.is_resource_write());
        assert_eq!(change.resource_type(), "");
        assert!(change.resource_payload().is_null());
    }
}
