//! Canonical request building primitives.
//!
//! Request signing operates on a deterministic, byte-exact representation of
//! the HTTP request. These functions produce that representation: a
//! canonicalized URI path, a sorted canonical query string, a sorted
//! canonical header block, the signed-header list, and the hash-and-hex
//! primitive used for both the body hash and the canonical request hash.
//! The remote side rebuilds the same strings to verify the signature, so
//! any deviation in encoding or ordering fails authentication.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};

/// Characters that are NOT percent-encoded in URI paths.
///
/// The RFC 3986 unreserved set (`A-Z a-z 0-9 - _ . ~`) plus the path
/// separator `/`.
const URI_PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Characters that are NOT percent-encoded in query strings.
///
/// The unreserved set only; `/` is encoded in query components.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// An ordered, case-normalized signing header map.
///
/// Keys are lower-cased header names; each key holds the ordered list of
/// values supplied for that header. `BTreeMap` keeps iteration sorted by
/// key, which is exactly the ordering the canonical header block requires.
pub type SigningHeaders = BTreeMap<String, Vec<String>>;

/// Percent-encode a string for use in a canonical request.
///
/// All characters outside `A-Za-z0-9-_.~` are encoded as uppercase `%XX`.
/// The forward slash is preserved only when `encode_slash` is false (path
/// position); query keys and values always encode it.
///
/// # Examples
///
/// ```
/// use paytabs::signing::uri_encode;
///
/// assert_eq!(uri_encode("/payment/token/", false), "/payment/token/");
/// assert_eq!(uri_encode("hello world", false), "hello%20world");
/// assert_eq!(uri_encode("a/b", true), "a%2Fb");
/// ```
pub fn uri_encode(input: &str, encode_slash: bool) -> String {
    if encode_slash {
        utf8_percent_encode(input, QUERY_SET).to_string()
    } else {
        utf8_percent_encode(input, URI_PATH_SET).to_string()
    }
}

/// Canonicalize a URI path.
///
/// Collapses runs of repeated `/` into a single separator and
/// percent-encodes the result with the path set. Dot segments are left
/// untouched; endpoint URLs are built from fixed tables and never contain
/// them.
///
/// # Examples
///
/// ```
/// use paytabs::signing::canonical_uri_path;
///
/// assert_eq!(canonical_uri_path("/payment//token/"), "/payment/token/");
/// assert_eq!(canonical_uri_path(""), "/");
/// ```
pub fn canonical_uri_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let mut collapsed = String::with_capacity(path.len());
    let mut prev_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_slash {
                collapsed.push('/');
            }
            prev_slash = true;
        } else {
            collapsed.push(ch);
            prev_slash = false;
        }
    }

    uri_encode(&collapsed, false)
}

/// Build a canonical query string from query parameters.
///
/// Each key and value is percent-encoded with the query set, entries are
/// sorted by key (then value, so duplicate keys order deterministically),
/// and joined as `key=value` pairs with `&`. The output is identical
/// regardless of input order.
///
/// # Examples
///
/// ```
/// use paytabs::signing::canonical_query_string;
///
/// let forward = vec![
///     ("a".to_string(), "1".to_string()),
///     ("b".to_string(), "2".to_string()),
/// ];
/// let reversed = vec![
///     ("b".to_string(), "2".to_string()),
///     ("a".to_string(), "1".to_string()),
/// ];
/// assert_eq!(canonical_query_string(&forward), "a=1&b=2");
/// assert_eq!(canonical_query_string(&forward), canonical_query_string(&reversed));
/// ```
pub fn canonical_query_string(query_params: &[(String, String)]) -> String {
    if query_params.is_empty() {
        return String::new();
    }

    let mut encoded: Vec<(String, String)> = query_params
        .iter()
        .map(|(key, value)| (uri_encode(key, true), uri_encode(value, true)))
        .collect();

    encoded.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical header block.
///
/// Every header in the signing map participates. For each key (already
/// lower-cased in [`SigningHeaders`]) the value list is joined with commas
/// and trimmed, producing one `key:value\n` line; lines are emitted in key
/// order and the block carries a trailing newline overall.
pub fn canonical_header_string(headers: &SigningHeaders) -> String {
    headers
        .iter()
        .map(|(name, values)| {
            let joined = values
                .iter()
                .map(|v| v.trim())
                .collect::<Vec<_>>()
                .join(",");
            format!("{}:{}\n", name, joined)
        })
        .collect()
}

/// Build the signed-headers list.
///
/// The sorted, semicolon-joined list of lower-cased header names included
/// in the canonical header block. It tells the receiver which headers are
/// covered by the signature.
pub fn signed_header_names(headers: &SigningHeaders) -> String {
    headers
        .keys()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(";")
}

/// SHA-256 over the input bytes, emitted as lower-case hex.
///
/// Used for the request body hash and for hashing the canonical request
/// before signing. An absent body hashes the empty string — every request
/// has a body-hash component, GET included.
///
/// # Examples
///
/// ```
/// use paytabs::signing::sha256_hex;
///
/// assert_eq!(
///     sha256_hex(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
