//! Transport layer abstraction.
//!
//! The [`Transport`] trait isolates the actual HTTP exchange so the retry
//! loop can be tested against scripted responses. The default
//! implementation uses reqwest with a TLS 1.2 floor.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::Client;

use crate::error::{PayTabsError, PayTabsResult};

use super::request::HttpMethod;
use super::response::RawResponse;

/// One fully-prepared HTTP exchange: resolved URL (query included), flat
/// header map, and the exact body bytes to send. Retries reuse the same
/// `TransportRequest` unchanged.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Fully-qualified URL with query string.
    pub url: String,
    /// Flat headers, lower-cased names.
    pub headers: BTreeMap<String, String>,
    /// Serialized body, if any.
    pub body: Option<String>,
}

/// Trait for HTTP transport implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one HTTP exchange.
    ///
    /// # Errors
    ///
    /// Returns [`PayTabsError::Transport`] (or `Timeout`) only for
    /// connection-level faults where no response was received. Any
    /// received response — whatever its status — is an `Ok` outcome;
    /// status-based retry decisions belong to the caller.
    async fn send(&self, request: &TransportRequest) -> PayTabsResult<RawResponse>;
}

/// Process-wide marker for the TLS floor side effect.
///
/// The upstream gateway rejects handshakes below TLS 1.2. Enforcing the
/// floor is idempotent and safe to race across concurrent constructions.
static TLS_FLOOR: OnceCell<()> = OnceCell::new();

fn enforce_tls_floor() {
    TLS_FLOOR.get_or_init(|| {
        tracing::debug!("enforcing TLS >= 1.2 for outbound PayTabs connections");
    });
}

/// Reqwest-based transport.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the given timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`PayTabsError::Transport`] if the underlying client
    /// cannot be constructed.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> PayTabsResult<Self> {
        enforce_tls_floor();

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .build()
            .map_err(|e| PayTabsError::Transport {
                message: format!("failed to create HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &TransportRequest) -> PayTabsResult<RawResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(PayTabsError::from)?;
        RawResponse::from_reqwest(response).await
    }
}
