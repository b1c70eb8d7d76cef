// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed access into nested resource and event payloads
//!
//! Resource and event data arrive as arbitrarily nested JSON. The tree itself
//! stays a [`serde_json::Value`] (string, number, map, array, null); this
//! module provides the few path lookups the engine needs so call sites never
//! pattern-match the tree by hand.

use bigdecimal::num_bigint::BigInt;
use serde_json::Value;

/// Path lookups over a payload tree
pub trait PayloadExt {
    /// Node at `path`, if every key along it exists
    fn at_path(&self, path: &[&str]) -> Option<&Value>;

    /// Scalar at `path` rendered as a string
    ///
    /// Strings are returned as-is and numbers in their decimal form. Missing
    /// keys, maps, arrays, booleans and null all yield an empty string.
    fn string_at(&self, path: &[&str]) -> String;
}

impl PayloadExt for Value {
    fn at_path(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |node, key| node.get(*key))
    }

    fn string_at(&self, path: &[&str]) -> String {
        self.at_path(path).map(scalar_to_string).unwrap_or_default()
    }
}

/// Render a scalar node as a string (empty for non-scalars)
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Parse a node holding an unsigned integer as a number or decimal string
pub fn parse_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

/// Parse a decimal integer string exactly; anything unparsable is zero
///
/// Amounts in this crate are never routed through floating point.
pub fn parse_amount(raw: &str) -> BigInt {
    raw.trim().parse::<BigInt>().unwrap_or_default()
}

/// Read a node that is either a bare string or an `{ "inner": "..." }` object reference
pub fn inner_or_string(value: &Value) -> String {
    match value.get("inner").and_then(Value::as_str) {
        Some(inner) => inner.to_string(),
        None => scalar_to_string(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_at_nested() {
        let payload = json!({"metadata": {"inner": "0xa"}, "balance": "100"});
        assert_eq!(payload.string_at(&["metadata", "inner"]), "0xa");
        assert_eq!(payload.string_at(&["balance"]), "100");
    }

    #[test]
    fn test_string_at_missing_or_non_scalar_is_empty() {
        let payload = json!({"metadata": {"inner": "0xa"}, "flag": true, "none": null});
        assert_eq!(payload.string_at(&["metadata"]), "");
        assert_eq!(payload.string_at(&["metadata", "outer"]), "");
        assert_eq!(payload.string_at(&["flag"]), "");
        assert_eq!(payload.string_at(&["none"]), "");
        assert_eq!(payload.string_at(&["balance", "deep"]), "");
    }

    #[test]
    fn test_string_at_renders_numbers() {
        let payload = json!({"decimals": 8});
        assert_eq!(payload.string_at(&["decimals"]), "8");
    }

    #[test]
    fn test_parse_u64_accepts_strings_and_numbers() {
        assert_eq!(parse_u64(&json!("42")), Some(42));
        assert_eq!(parse_u64(&json!(7)), Some(7));
        assert_eq!(parse_u64(&json!("-1")), None);
        assert_eq!(parse_u64(&json!("x")), None);
    }

    #[test]
    fn test_parse_amount_exact() {
        let big = "340282366920938463463374607431768211457";
        assert_eq!(parse_amount(big).to_string(), big);
        assert_eq!(parse_amount(""), BigInt::default());
        assert_eq!(parse_amount("1.5"), BigInt::default());
    }

    #[test]
    fn test_inner_or_string() {
        assert_eq!(inner_or_string(&json!({"inner": "0xabc"})), "0xabc");
        assert_eq!(inner_or_string(&json!("0xdef")), "0xdef");
    }
}
