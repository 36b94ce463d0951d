//! HTTP layer: request/response types, transport abstraction, and the
//! retrying executor.
//!
//! The flow for one logical call:
//!
//! 1. An operation builds an [`ApiRequest`] (URL from
//!    [`crate::endpoints::UrlBuilder`], JSON body serialized once).
//! 2. The signed path runs the request through
//!    [`crate::signing::RequestSigner`] first; the unsigned path flattens
//!    the request's own headers.
//! 3. [`HttpClient::execute`] drives the exchange over a [`Transport`],
//!    retrying transient statuses with exponential backoff, and wraps the
//!    terminal response into an [`ApiResponse`] envelope.

mod client;
mod request;
mod response;
mod transport;

pub use client::HttpClient;
pub use request::{ApiRequest, HttpMethod};
pub use response::{ApiResponse, RawResponse, REQUEST_ID_HEADER};
pub use transport::{ReqwestTransport, Transport, TransportRequest};
