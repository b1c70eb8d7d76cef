// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Move source published alongside package metadata
//!
//! Packages built with `--save-metadata` store each module's source in the
//! account's `PackageRegistry` as hex-encoded gzip. Modules published
//! without it carry an empty source and are skipped.

use std::io::Read;

use flate2::read::GzDecoder;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, Instrument};

use crate::client::LedgerClient;
use crate::config::constants::type_tags;
use crate::errors::SourceCodeError;
use crate::spans;

/// One module's decoded source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSource {
    pub package: String,
    pub module: String,
    pub source: String,
}

/// Which modules to return; `None` matches everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceFilter<'a> {
    pub package: Option<&'a str>,
    pub module: Option<&'a str>,
}

/// Decode a hex-encoded gzip source blob, with or without the `0x` prefix
pub fn decode_source(encoded: &str) -> Result<String, SourceCodeError> {
    let hex_digits = encoded.strip_prefix("0x").unwrap_or(encoded);
    let compressed = hex::decode(hex_digits).map_err(|e| SourceCodeError::decode(e.to_string()))?;
    let mut source = String::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_string(&mut source)
        .map_err(|e| SourceCodeError::decode(e.to_string()))?;
    Ok(source)
}

/// Collect matching module sources from a `PackageRegistry` payload.
///
/// Undecodable blobs are skipped like missing ones. An empty result is an
/// error that tells apart a module published without source from a module
/// that does not exist.
pub fn extract_sources(
    registry: &Value,
    filter: SourceFilter<'_>,
) -> Result<Vec<ModuleSource>, SourceCodeError> {
    let packages = registry
        .get("packages")
        .and_then(Value::as_array)
        .ok_or(SourceCodeError::MalformedRegistry)?;

    let mut sources = Vec::new();
    let mut module_seen = false;

    for package in packages {
        let package_name = package.get("name").and_then(Value::as_str).unwrap_or_default();
        if filter.package.is_some_and(|wanted| wanted != package_name) {
            continue;
        }
        let Some(modules) = package.get("modules").and_then(Value::as_array) else {
            continue;
        };

        for module in modules {
            let module_name = module.get("name").and_then(Value::as_str).unwrap_or_default();
            if let Some(wanted) = filter.module {
                if wanted != module_name {
                    continue;
                }
                module_seen = true;
            }

            let encoded = module.get("source").and_then(Value::as_str).unwrap_or_default();
            if encoded.is_empty() {
                continue;
            }
            match decode_source(encoded) {
                Ok(source) => sources.push(ModuleSource {
                    package: package_name.to_string(),
                    module: module_name.to_string(),
                    source,
                }),
                Err(error) => {
                    debug!(
                        package = package_name,
                        module = module_name,
                        error = %error,
                        "Skipping undecodable source"
                    );
                }
            }
        }
    }

    if sources.is_empty() {
        return Err(match filter.module {
            Some(name) if !module_seen => SourceCodeError::module_not_found(name),
            _ => SourceCodeError::NoSourceAvailable,
        });
    }
    Ok(sources)
}

/// Read the package registry of `address` and extract matching sources
pub async fn fetch_sources<C: LedgerClient>(
    client: &C,
    address: &str,
    filter: SourceFilter<'_>,
    ledger_version: Option<u64>,
) -> Result<Vec<ModuleSource>, SourceCodeError> {
    let span = spans::source_code(address);
    async {
        let registry = client
            .fetch_resource_at(address, type_tags::PACKAGE_REGISTRY, ledger_version)
            .await
            .map_err(|e| SourceCodeError::registry_fetch(address, e))?;
        extract_sources(&registry.data, filter)
    }
    .instrument(span)
    .await
}
