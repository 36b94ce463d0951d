//! High-level PayTabs client.
//!
//! [`PayTabsClient`] owns the signer, the URL builder, and the retrying
//! HTTP executor, and exposes one method per gateway operation. Token
//! lifecycle calls authenticate with the merchant server key; delivery
//! tracking goes through the canonical-request signing path.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::PayTabsConfig;
use crate::endpoints::UrlBuilder;
use crate::error::{PayTabsError, PayTabsResult};
use crate::http::{ApiRequest, ApiResponse, HttpClient, ReqwestTransport, Transport};
use crate::signing::RequestSigner;
use crate::types::{
    AuthorizationTokenRequest, DeliveryTrackingRequest, InvoiceAuthorizationTokenRequest,
    RevokeTokenRequest, TokenQueryRequest,
};

/// Client for the PayTabs payment gateway.
///
/// Construction parses the configured private key and builds the HTTP
/// transport; both are fatal on failure, so a constructed client is always
/// able to sign. Wrap the client in an `Arc` to share it across tasks.
///
/// # Example
///
/// ```no_run
/// use paytabs::client::PayTabsClient;
/// use paytabs::config::PayTabsConfig;
/// use paytabs::types::AuthorizationTokenRequest;
///
/// # async fn example(pem: &str) -> Result<(), Box<dyn std::error::Error>> {
/// let config = PayTabsConfig::builder()
///     .region("SAU")
///     .client_key("CK-xxxx")
///     .server_key("SK-xxxx")
///     .private_key_pem(pem)
///     .build()?;
/// let client = PayTabsClient::new(config)?;
///
/// let response = client
///     .authorization_token(&AuthorizationTokenRequest {
///         profile_id: 1234,
///         tran_ref: None,
///     })
///     .await?;
/// assert!(response.is_success());
/// # Ok(())
/// # }
/// ```
pub struct PayTabsClient {
    config: PayTabsConfig,
    signer: RequestSigner,
    urls: UrlBuilder,
    http: HttpClient,
}

impl std::fmt::Debug for PayTabsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayTabsClient")
            .field("config", &self.config)
            .field("signer", &self.signer)
            .field("urls", &self.urls)
            .finish_non_exhaustive()
    }
}

impl PayTabsClient {
    /// Create a client from configuration with the default transport.
    ///
    /// # Errors
    ///
    /// Returns [`PayTabsError::Signing`] when the configured private key
    /// cannot be parsed and [`PayTabsError::Transport`] when the HTTP
    /// client cannot be built.
    pub fn new(config: PayTabsConfig) -> PayTabsResult<Self> {
        Self::builder().config(config).build()
    }

    /// Create a client builder.
    pub fn builder() -> PayTabsClientBuilder {
        PayTabsClientBuilder::default()
    }

    /// The endpoint URL builder for the configured region.
    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// The active configuration.
    pub fn config(&self) -> &PayTabsConfig {
        &self.config
    }

    /// Issue an authorization token for the merchant profile.
    ///
    /// Unsigned call: authenticates with the configured server key.
    pub async fn authorization_token(
        &self,
        request: &AuthorizationTokenRequest,
    ) -> PayTabsResult<ApiResponse> {
        let url = self.urls.build_full_api_path("token", "", "", "");
        self.post_unsigned(url, request).await
    }

    /// Issue an authorization token scoped to an invoice.
    ///
    /// Unsigned call: authenticates with the configured server key.
    pub async fn invoice_authorization_token(
        &self,
        request: &InvoiceAuthorizationTokenRequest,
    ) -> PayTabsResult<ApiResponse> {
        let url = self.urls.build_full_api_path("invoice", "token", "", "");
        self.post_unsigned(url, request).await
    }

    /// Query the state of a previously issued token.
    ///
    /// Unsigned call: authenticates with the configured server key.
    pub async fn token_query(&self, request: &TokenQueryRequest) -> PayTabsResult<ApiResponse> {
        let url = self.urls.build_full_api_path("token", "query", "", "");
        self.post_unsigned(url, request).await
    }

    /// Revoke a previously issued token.
    ///
    /// Unsigned call: authenticates with the configured server key.
    pub async fn revoke_token(&self, request: &RevokeTokenRequest) -> PayTabsResult<ApiResponse> {
        let url = self.urls.build_full_api_path("token", "delete", "", "");
        self.post_unsigned(url, request).await
    }

    /// Submit delivery tracking information for a transaction.
    ///
    /// Signed call: the request is canonicalized and signed with the
    /// merchant private key before dispatch.
    pub async fn send_delivery_tracking_information(
        &self,
        request: &DeliveryTrackingRequest,
    ) -> PayTabsResult<ApiResponse> {
        let url = self.urls.build_full_api_path("delivery", "tracking", "", "");
        let api_request = ApiRequest::post(url).json(request)?;
        self.send_signed(api_request).await
    }

    /// Dispatch a prepared request through the signed path.
    ///
    /// The request is signed exactly once, before the retry loop, so
    /// retries resend the same signature over the same bytes.
    ///
    /// # Errors
    ///
    /// [`PayTabsError::Signing`] when the URL cannot be parsed for
    /// canonicalization, plus the transport-level errors of
    /// [`HttpClient::execute`].
    pub async fn send_signed(&self, request: ApiRequest) -> PayTabsResult<ApiResponse> {
        let signed = self.signer.sign_request(
            request.method().as_str(),
            request.url(),
            request.query_params(),
            request.headers(),
            request.body().map(str::as_bytes),
            &Utc::now(),
        )?;

        debug!(url = request.url(), "dispatching signed request");
        self.http.execute(&request, Some(signed)).await
    }

    /// Dispatch a prepared request through the unsigned path.
    ///
    /// When the request carries no `authorization` header, the configured
    /// server key is injected; a caller-supplied value is left untouched.
    pub async fn send_unsigned(&self, mut request: ApiRequest) -> PayTabsResult<ApiResponse> {
        if !request.has_header("authorization") {
            request = request.header("authorization", self.config.server_key.clone());
        }
        if !request.has_header("user-agent") {
            request = request.header("user-agent", self.signer.user_agent().to_string());
        }

        debug!(url = request.url(), "dispatching unsigned request");
        self.http.execute(&request, None).await
    }

    async fn post_unsigned<T: Serialize>(
        &self,
        url: String,
        body: &T,
    ) -> PayTabsResult<ApiResponse> {
        let request = ApiRequest::post(url)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .json(body)?;
        self.send_unsigned(request).await
    }
}

/// Builder for [`PayTabsClient`].
#[derive(Default)]
pub struct PayTabsClientBuilder {
    config: Option<PayTabsConfig>,
    transport: Option<Arc<dyn Transport>>,
    cancellation: Option<CancellationToken>,
}

impl PayTabsClientBuilder {
    /// Set the client configuration (required).
    pub fn config(mut self, config: PayTabsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the HTTP transport. Used for scripted transports in tests.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Attach a cancellation token honored between retry attempts.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// [`PayTabsError::Configuration`] when no configuration was supplied,
    /// [`PayTabsError::Signing`] for unparseable key material, and
    /// [`PayTabsError::Transport`] when the HTTP client cannot be built.
    pub fn build(self) -> PayTabsResult<PayTabsClient> {
        let config = self.config.ok_or_else(|| PayTabsError::Configuration {
            message: "client configuration is required".to_string(),
        })?;

        let signer = RequestSigner::new(
            config.region,
            config.client_key.clone(),
            &config.private_key_pem,
            config.algorithm,
            config.user_agent.clone(),
        )?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(config.timeout, config.connect_timeout)?),
        };

        let mut http = HttpClient::new(transport, config.retry.clone());
        if let Some(token) = self.cancellation {
            http = http.with_cancellation(token);
        }

        Ok(PayTabsClient {
            urls: UrlBuilder::new(config.region),
            signer,
            http,
            config,
        })
    }
}
