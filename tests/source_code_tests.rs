// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Reading published module sources through the package registry

mod helpers;

use std::io::Write;

use aptscan::config::constants::type_tags;
use aptscan::source_code::{fetch_sources, ModuleSource, SourceFilter};
use aptscan::SourceCodeError;
use flate2::write::GzEncoder;
use flate2::Compression;
use helpers::{Call, MockLedgerClient};
use serde_json::json;

fn gzip_hex(source: &str) -> String {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(source.as_bytes()).unwrap();
    hex::encode(encoder.finish().unwrap())
}

#[tokio::test]
async fn test_sources_read_at_requested_version() {
    let client = MockLedgerClient::new().with_resource(
        "0xcafe",
        type_tags::PACKAGE_REGISTRY,
        json!({
            "packages": [{
                "name": "Vault",
                "modules": [{ "name": "vault", "source": gzip_hex("module 0xcafe::vault {}") }]
            }]
        }),
    );

    let filter = SourceFilter {
        package: None,
        module: Some("vault"),
    };
    let sources = fetch_sources(&client, "0xcafe", filter, Some(900)).await.unwrap();

    assert_eq!(
        sources,
        vec![ModuleSource {
            package: "Vault".into(),
            module: "vault".into(),
            source: "module 0xcafe::vault {}".into(),
        }]
    );
    assert_eq!(
        client.calls(),
        vec![Call::Resource {
            address: "0xcafe".into(),
            resource_type: type_tags::PACKAGE_REGISTRY.into(),
            version: Some(900),
        }]
    );
}

#[tokio::test]
async fn test_account_without_registry_has_no_code_metadata() {
    let client = MockLedgerClient::new();

    let error = fetch_sources(&client, "0xbeef", SourceFilter::default(), None)
        .await
        .unwrap_err();

    assert!(matches!(error, SourceCodeError::NoCodeMetadata { ref address } if address == "0xbeef"));
    assert_eq!(error.to_string(), "no code metadata found at address 0xbeef");
}

#[tokio::test]
async fn test_registry_server_error_is_not_reported_as_missing() {
    let client =
        MockLedgerClient::new().with_failing_resource("0xbeef", type_tags::PACKAGE_REGISTRY);

    let error = fetch_sources(&client, "0xbeef", SourceFilter::default(), None)
        .await
        .unwrap_err();

    assert!(matches!(error, SourceCodeError::RegistryFetch { .. }));
}
