// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for the Aptos node REST API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, Instrument};
use url::Url;

use super::{LedgerClient, RateLimiter, RetryPolicy, ViewRequest};
use crate::errors::RpcError;
use crate::spans;
use crate::types::transaction::{Resource, TransactionRef};
use crate::AptscanConfig;

/// REST client for a single node
///
/// Cloning is cheap; clones share the connection pool and the rate limiter.
#[derive(Clone, Debug)]
pub struct RestClient {
    http: reqwest::Client,
    base: Url,
    timeout: Duration,
    retry: RetryPolicy,
    limiter: Option<RateLimiter>,
}

impl RestClient {
    /// Build a client for the node configured in `config`
    pub fn new(config: &AptscanConfig) -> Result<Self, RpcError> {
        let base = Url::parse(config.base_url()).map_err(|source| RpcError::InvalidUrl {
            url: config.node_url.clone(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(RpcError::InvalidUrl {
                url: config.node_url.clone(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RpcError::transport("building HTTP client", e))?;

        Ok(Self {
            http,
            base,
            timeout: config.request_timeout,
            retry: RetryPolicy::from_config(config),
            limiter: config.rate_limit_per_second.map(RateLimiter::per_second),
        })
    }

    /// Base URL every request is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Endpoint URL for `segments` under the base, each segment percent-encoded
    pub fn endpoint<S: AsRef<str>>(&self, segments: &[S], query: &[(&str, String)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments.iter());
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    /// `GET` a JSON document
    pub async fn get_json<S: AsRef<str>>(
        &self,
        segments: &[S],
        query: &[(&str, String)],
    ) -> Result<Value, RpcError> {
        let url = self.endpoint(segments, query);
        let span = spans::rest_request("GET", url.path());
        self.send(&url, || self.http.get(url.clone()))
            .instrument(span)
            .await
    }

    /// `POST` a JSON body and read a JSON document back
    pub async fn post_json<S: AsRef<str>, B: Serialize + Sync>(
        &self,
        segments: &[S],
        query: &[(&str, String)],
        body: &B,
    ) -> Result<Value, RpcError> {
        let url = self.endpoint(segments, query);
        let span = spans::rest_request("POST", url.path());
        self.send(&url, || self.http.post(url.clone()).json(body))
            .instrument(span)
            .await
    }

    async fn send<F>(&self, url: &Url, build: F) -> Result<Value, RpcError>
    where
        F: Fn() -> RequestBuilder,
    {
        let path = url.path();
        self.retry
            .run(path, || self.send_once(path, build()))
            .await
    }

    async fn send_once(&self, path: &str, request: RequestBuilder) -> Result<Value, RpcError> {
        if let Some(limiter) = &self.limiter {
            limiter.acquire().await;
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RpcError::timeout(path, self.timeout)
            } else {
                RpcError::transport(path, e)
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RpcError::transport(path, e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Node responded");

        if status == StatusCode::NOT_FOUND {
            return Err(RpcError::not_found(path));
        }
        if !status.is_success() {
            return Err(RpcError::api(status.as_u16(), path, body));
        }

        serde_json::from_str(&body).map_err(|e| RpcError::decode(path, e))
    }
}

/// `ledger_version` query pair, if a version was given
pub(crate) fn ledger_version_query(version: Option<u64>) -> Vec<(&'static str, String)> {
    version
        .map(|v| vec![("ledger_version", v.to_string())])
        .unwrap_or_default()
}

#[async_trait]
impl LedgerClient for RestClient {
    async fn fetch_transaction(&self, tx_ref: &TransactionRef) -> Result<Value, RpcError> {
        let segments = match tx_ref {
            TransactionRef::Version(version) => {
                vec!["transactions".to_string(), "by_version".to_string(), version.to_string()]
            }
            TransactionRef::Hash(hash) => {
                vec!["transactions".to_string(), "by_hash".to_string(), hash.clone()]
            }
        };
        self.get_json(&segments, &[]).await
    }

    async fn fetch_resource_at(
        &self,
        address: &str,
        resource_type: &str,
        version: Option<u64>,
    ) -> Result<Resource, RpcError> {
        let segments = ["accounts", address, "resource", resource_type];
        let value = self.get_json(&segments, &ledger_version_query(version)).await?;
        serde_json::from_value(value)
            .map_err(|e| RpcError::decode(format!("resource {resource_type} at {address}"), e))
    }

    async fn invoke_view(&self, request: &ViewRequest) -> Result<Vec<Value>, RpcError> {
        let value = self
            .post_json(&["view"], &ledger_version_query(request.ledger_version), request)
            .await?;
        serde_json::from_value(value)
            .map_err(|e| RpcError::decode(format!("view {}", request.function), e))
    }
}
