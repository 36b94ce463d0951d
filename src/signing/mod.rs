//! Canonical request signing for the PayTabs API.
//!
//! Authenticated endpoints require every request to carry an
//! `authorization` header derived from the request itself:
//!
//! 1. **canonical** — deterministic string forms of the path, query,
//!    headers, and body hash
//! 2. **signer** — composes those into the canonical request and
//!    string-to-sign, then signs with RSA-PSS over SHA-256
//! 3. **algorithm** — the closed set of signing variants (name + salt
//!    length)
//!
//! The verifier on the PayTabs side rebuilds the identical canonical
//! request, so every byte of the canonicalization rules is load-bearing.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::Utc;
//! use paytabs::endpoints::Region;
//! use paytabs::signing::{RequestSigner, SigningAlgorithm, SigningHeaders};
//!
//! # fn example(pem: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let signer = RequestSigner::new(
//!     Region::Sau,
//!     "CK-xxxx",
//!     pem,
//!     SigningAlgorithm::RsaPssSha256,
//!     None,
//! )?;
//!
//! let signed = signer.sign_request(
//!     "POST",
//!     "https://secure.paytabs.sa/payment/token/",
//!     &[],
//!     &SigningHeaders::new(),
//!     Some(b"{\"profile_id\":1234}"),
//!     &Utc::now(),
//! )?;
//!
//! assert!(signed.contains_key("authorization"));
//! # Ok(())
//! # }
//! ```

mod algorithm;
mod canonical;
mod error;
mod signer;

pub use algorithm::SigningAlgorithm;
pub use canonical::{
    canonical_header_string, canonical_query_string, canonical_uri_path, sha256_hex,
    signed_header_names, uri_encode, SigningHeaders,
};
pub use error::SigningError;
pub use signer::{format_datetime, RequestSigner, SignedResult, DATE_HEADER, REGION_HEADER};
