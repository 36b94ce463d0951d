//! Response handling for the PayTabs API.
//!
//! The transport produces a [`RawResponse`]; the client wraps the terminal
//! one (after retries settle) into an [`ApiResponse`] envelope together
//! with the request context and retry accounting.

use std::collections::HashMap;

use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{PayTabsError, PayTabsResult};

use super::request::HttpMethod;

/// Response header carrying the PayTabs request identifier.
pub const REQUEST_ID_HEADER: &str = "pt-request-id";

/// The bare outcome of one HTTP exchange.
///
/// Header names are lower-cased on construction so lookups are
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers, lower-cased names.
    pub headers: HashMap<String, String>,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Drain a reqwest response into a `RawResponse`.
    ///
    /// # Errors
    ///
    /// Returns [`PayTabsError::Transport`] when the body stream cannot be
    /// read — a connection-level fault, not a business failure.
    pub async fn from_reqwest(response: reqwest::Response) -> PayTabsResult<Self> {
        let status = response.status();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), value_str.to_string());
            }
        }

        let body = response.text().await.map_err(|e| PayTabsError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            status,
            headers,
            body,
        })
    }
}

/// The result envelope returned for every completed call.
///
/// Created fresh per call, filled from exactly one terminal exchange, and
/// never mutated after being returned. Business-level failures (4xx, error
/// payloads) arrive here too — only connection faults surface as errors.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
    request_body: Option<String>,
    url: String,
    method: HttpMethod,
    headers: HashMap<String, String>,
    request_id: Option<String>,
    retries: u32,
    elapsed_ms: u64,
}

impl ApiResponse {
    /// Assemble the envelope from the terminal exchange and call context.
    pub(crate) fn new(
        raw: RawResponse,
        request_body: Option<String>,
        url: String,
        method: HttpMethod,
        retries: u32,
        elapsed_ms: u64,
    ) -> Self {
        let request_id = raw
            .headers
            .get(REQUEST_ID_HEADER)
            .or_else(|| raw.headers.get("x-request-id"))
            .cloned();

        Self {
            status: raw.status,
            body: raw.body,
            request_body,
            url,
            method,
            headers: raw.headers,
            request_id,
            retries,
            elapsed_ms,
        }
    }

    /// HTTP status code of the terminal exchange.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the terminal status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Raw response body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The request body that was sent, if any.
    pub fn request_body(&self) -> Option<&str> {
        self.request_body.as_deref()
    }

    /// The resolved URL the call was made against (query string included).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The HTTP method used.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Response headers, lower-cased names.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Look up a response header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// The PayTabs request identifier, when the response carried one.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Retries consumed before the terminal exchange.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Round-trip duration in milliseconds, backoff included.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Deserialize the response body into a typed payload.
    ///
    /// Applies the `shipping_details` normalization first: the upstream
    /// API double-encodes that array on some responses, returning each
    /// element as a JSON-encoded *string*; such elements are re-parsed
    /// into objects before typed deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`PayTabsError::Serialization`] when the body is empty or
    /// not valid JSON for `T`.
    pub fn payload<T: DeserializeOwned>(&self) -> PayTabsResult<T> {
        if self.body.is_empty() {
            return Err(PayTabsError::Serialization {
                message: "response body is empty".to_string(),
            });
        }

        let mut value: serde_json::Value = serde_json::from_str(&self.body)?;
        normalize_shipping_details(&mut value);
        serde_json::from_value(value).map_err(PayTabsError::from)
    }
}

/// Re-parse double-encoded `shipping_details` entries in place.
///
/// When the payload contains a `shipping_details` array whose elements are
/// JSON-encoded strings, each element is replaced by its parsed object.
/// Elements that are already objects, or strings that do not parse as
/// JSON, are left untouched.
fn normalize_shipping_details(value: &mut serde_json::Value) {
    let Some(details) = value
        .as_object_mut()
        .and_then(|obj| obj.get_mut("shipping_details"))
        .and_then(|d| d.as_array_mut())
    else {
        return;
    };

    for entry in details {
        if let serde_json::Value::String(encoded) = entry {
            if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(encoded) {
                *entry = parsed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HashMap::new(),
            body: body.to_string(),
        }
    }

    fn envelope(raw: RawResponse) -> ApiResponse {
        ApiResponse::new(
            raw,
            None,
            "https://secure.paytabs.sa/payment/token/".to_string(),
            HttpMethod::Post,
            0,
            12,
        )
    }

    #[test]
    fn test_request_id_extraction() {
        let mut headers = HashMap::new();
        headers.insert(REQUEST_ID_HEADER.to_string(), "req-123".to_string());
        let response = envelope(RawResponse {
            status: StatusCode::OK,
            headers,
            body: String::new(),
        });
        assert_eq!(response.request_id(), Some("req-123"));
    }

    #[test]
    fn test_request_id_fallback_header() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), "req-456".to_string());
        let response = envelope(RawResponse {
            status: StatusCode::OK,
            headers,
            body: String::new(),
        });
        assert_eq!(response.request_id(), Some("req-456"));
    }

    #[test]
    fn test_header_lookup_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let response = envelope(RawResponse {
            status: StatusCode::OK,
            headers,
            body: String::new(),
        });
        assert_eq!(response.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_payload_empty_body_is_error() {
        let response = envelope(raw(200, ""));
        let err = response.payload::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, PayTabsError::Serialization { .. }));
    }

    #[test]
    fn test_payload_deserializes() {
        #[derive(Deserialize)]
        struct Token {
            token: String,
        }

        let response = envelope(raw(200, r#"{"token":"TOK-1"}"#));
        let payload: Token = response.payload().unwrap();
        assert_eq!(payload.token, "TOK-1");
    }

    #[test]
    fn test_shipping_details_double_encoding_normalized() {
        #[derive(Deserialize)]
        struct Detail {
            carrier: String,
            tracking_number: String,
        }

        #[derive(Deserialize)]
        struct Payload {
            shipping_details: Vec<Detail>,
        }

        let body = r#"{
            "shipping_details": [
                "{\"carrier\":\"dhl\",\"tracking_number\":\"T1\"}",
                "{\"carrier\":\"aramex\",\"tracking_number\":\"T2\"}"
            ]
        }"#;

        let response = envelope(raw(200, body));
        let payload: Payload = response.payload().unwrap();
        assert_eq!(payload.shipping_details.len(), 2);
        assert_eq!(payload.shipping_details[0].carrier, "dhl");
        assert_eq!(payload.shipping_details[1].tracking_number, "T2");
    }

    #[test]
    fn test_shipping_details_plain_objects_untouched() {
        let body = r#"{"shipping_details":[{"carrier":"dhl"}]}"#;
        let response = envelope(raw(200, body));
        let value: serde_json::Value = response.payload().unwrap();
        assert_eq!(value["shipping_details"][0]["carrier"], "dhl");
    }

    #[test]
    fn test_shipping_details_unparseable_string_left_as_is() {
        let body = r#"{"shipping_details":["not json at all {{"]}"#;
        let response = envelope(raw(200, body));
        let value: serde_json::Value = response.payload().unwrap();
        assert!(value["shipping_details"][0].is_string());
    }

    #[test]
    fn test_envelope_accessors() {
        let response = ApiResponse::new(
            raw(400, r#"{"message":"bad request"}"#),
            Some("{\"profile_id\":1}".to_string()),
            "https://secure.paytabs.sa/payment/token/".to_string(),
            HttpMethod::Post,
            2,
            6100,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!response.is_success());
        assert_eq!(response.retries(), 2);
        assert_eq!(response.elapsed_ms(), 6100);
        assert_eq!(response.request_body(), Some("{\"profile_id\":1}"));
        assert_eq!(response.method(), HttpMethod::Post);
    }
}
