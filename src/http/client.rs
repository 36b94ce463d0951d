//! HTTP execution with transient-failure retries.
//!
//! One component serves both the signed and unsigned paths: the caller
//! either hands over a pre-signed flat header map or the request's own
//! headers are flattened and sent as-is. The retry loop is strictly
//! sequential — one attempt at a time, a non-blocking backoff sleep
//! between attempts, and the same request bytes on every resend.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::error::{PayTabsError, PayTabsResult};
use crate::signing::{uri_encode, SignedResult};

use super::request::ApiRequest;
use super::response::ApiResponse;
use super::transport::{Transport, TransportRequest};

/// Executes prepared requests against a [`Transport`] with retries.
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    retry: RetryConfig,
    cancellation: Option<CancellationToken>,
}

impl HttpClient {
    /// Create a client over the given transport.
    pub fn new(transport: Arc<dyn Transport>, retry: RetryConfig) -> Self {
        Self {
            transport,
            retry,
            cancellation: None,
        }
    }

    /// Attach a cancellation token.
    ///
    /// When the token fires, the in-flight call aborts before its next
    /// sleep or attempt and surfaces [`PayTabsError::Cancelled`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Execute a call to completion.
    ///
    /// `presigned` carries the flat header map produced by the request
    /// signer; when absent the request's own headers are flattened (first
    /// value per key) and sent unsigned.
    ///
    /// Responses with a transient status (408, 429, 500, 502, 503, 504)
    /// are retried with exponential backoff up to the configured maximum;
    /// exhaustion surfaces the last transient response as the final
    /// envelope, not an error. Any other status is terminal.
    ///
    /// # Errors
    ///
    /// [`PayTabsError::Transport`]/[`PayTabsError::Timeout`] for
    /// connection-level faults, [`PayTabsError::Cancelled`] when the
    /// cancellation token fires.
    pub async fn execute(
        &self,
        request: &ApiRequest,
        presigned: Option<SignedResult>,
    ) -> PayTabsResult<ApiResponse> {
        let url = resolve_url(request);
        let headers = presigned.unwrap_or_else(|| flatten_headers(request));
        let transport_request = TransportRequest {
            method: request.method(),
            url: url.clone(),
            headers,
            body: request.body().map(str::to_string),
        };

        let started = Instant::now();
        let mut retries: u32 = 0;

        loop {
            self.bail_if_cancelled(retries, &started)?;

            let raw = self.transport.send(&transport_request).await?;

            if !self.retry.is_transient(raw.status) {
                debug!(
                    status = raw.status.as_u16(),
                    retries, url = %url, "terminal response"
                );
                return Ok(self.envelope(raw, request, url, retries, &started));
            }

            retries += 1;
            if retries > self.retry.max_retries {
                warn!(
                    status = raw.status.as_u16(),
                    max_retries = self.retry.max_retries,
                    url = %url,
                    "retries exhausted, surfacing last transient response"
                );
                // Retries consumed equals the re-attempts actually made.
                return Ok(self.envelope(raw, request, url, retries - 1, &started));
            }

            let delay = self.retry.delay_for(retries);
            debug!(
                status = raw.status.as_u16(),
                retry = retries,
                delay_ms = delay.as_millis() as u64,
                "transient response, backing off"
            );

            match &self.cancellation {
                Some(token) => {
                    tokio::select! {
                        _ = token.cancelled() => {
                            return Err(PayTabsError::Cancelled {
                                retries,
                                elapsed: started.elapsed(),
                            });
                        }
                        _ = sleep(delay) => {}
                    }
                }
                None => sleep(delay).await,
            }
        }
    }

    fn bail_if_cancelled(&self, retries: u32, started: &Instant) -> PayTabsResult<()> {
        if let Some(token) = &self.cancellation {
            if token.is_cancelled() {
                return Err(PayTabsError::Cancelled {
                    retries,
                    elapsed: started.elapsed(),
                });
            }
        }
        Ok(())
    }

    fn envelope(
        &self,
        raw: super::response::RawResponse,
        request: &ApiRequest,
        url: String,
        retries: u32,
        started: &Instant,
    ) -> ApiResponse {
        ApiResponse::new(
            raw,
            request.body().map(str::to_string),
            url,
            request.method(),
            retries,
            started.elapsed().as_millis() as u64,
        )
    }
}

/// Append the query string to the request URL.
///
/// Pairs keep their insertion order on the wire; only the *canonical*
/// query string (used for signing) is sorted.
fn resolve_url(request: &ApiRequest) -> String {
    if request.query_params().is_empty() {
        return request.url().to_string();
    }

    let query = request
        .query_params()
        .iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k, true), uri_encode(v, true)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", request.url(), query)
}

/// Flatten the request's ordered header map to one value per key.
fn flatten_headers(request: &ApiRequest) -> BTreeMap<String, String> {
    request
        .headers()
        .iter()
        .filter_map(|(name, values)| {
            values.first().map(|v| (name.clone(), v.clone()))
        })
        .collect()
}
