//! PayTabs payment gateway client with canonical request signing.
//!
//! This crate talks to the PayTabs API: it resolves the per-market
//! endpoint from a region code, signs authenticated requests with RSA-PSS
//! over a canonical request representation, and drives every call through
//! a retrying HTTP transport that treats transient gateway statuses as a
//! backoff signal rather than an error.
//!
//! # Features
//!
//! - **Canonical request signing**: deterministic canonicalization of
//!   method, path, query, headers, and body hash, signed with RSA-PSS over
//!   SHA-256 and carried in the `authorization` header
//! - **Region-aware endpoints**: fixed domain tables for the SAU, ARE,
//!   EGY, OMN, JOR, and IRQ markets with a global fallback
//! - **Transient-failure retries**: exponential backoff on 408, 429, 500,
//!   502, 503, and 504; exhaustion surfaces the last response, not an error
//! - **Cooperative cancellation**: an optional token aborts between
//!   attempts
//!
//! # Quick Start
//!
//! ```no_run
//! use paytabs::client::PayTabsClient;
//! use paytabs::config::PayTabsConfig;
//! use paytabs::types::{AuthorizationTokenRequest, PayTabsPayload};
//!
//! # async fn example(pem: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let config = PayTabsConfig::builder()
//!     .region("SAU")
//!     .client_key("CK-xxxx")
//!     .server_key("SK-xxxx")
//!     .private_key_pem(pem)
//!     .build()?;
//!
//! let client = PayTabsClient::new(config)?;
//! let response = client
//!     .authorization_token(&AuthorizationTokenRequest {
//!         profile_id: 1234,
//!         tran_ref: None,
//!     })
//!     .await?;
//!
//! let payload: PayTabsPayload = response.payload()?;
//! println!("token: {:?}", payload.token);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod signing;
pub mod types;

pub use client::{PayTabsClient, PayTabsClientBuilder};
pub use config::{PayTabsConfig, PayTabsConfigBuilder, RetryConfig};
pub use endpoints::{Region, UrlBuilder};
pub use error::{PayTabsError, PayTabsResult};
pub use http::{ApiRequest, ApiResponse, HttpMethod};
