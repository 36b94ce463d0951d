//! Request types for the PayTabs API.

use serde::Serialize;

use crate::error::{PayTabsError, PayTabsResult};
use crate::signing::SigningHeaders;

/// HTTP methods used by the PayTabs API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request; never carries a body.
    Get,
    /// POST request.
    Post,
}

impl HttpMethod {
    /// The method's wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A single API call, short-lived and owned by the calling operation.
///
/// The target URL comes from [`crate::endpoints::UrlBuilder`]; the body, if
/// any, is serialized to JSON exactly once at construction, so retries
/// resend the same bytes.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: HttpMethod,
    url: String,
    query_params: Vec<(String, String)>,
    headers: SigningHeaders,
    body: Option<String>,
}

impl ApiRequest {
    /// Create a GET request for the given fully-qualified URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Create a POST request for the given fully-qualified URL.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Create a request with the specified method.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query_params: Vec::new(),
            headers: SigningHeaders::new(),
            body: None,
        }
    }

    /// Append a query parameter. A key may be supplied multiple times;
    /// value order per key is preserved.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Add a header value. The name is lower-cased; repeated calls with
    /// the same name append to the value list.
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.as_ref().to_lowercase())
            .or_default()
            .push(value.into());
        self
    }

    /// Set the body by serializing a value to JSON.
    ///
    /// Serialization happens here, once per logical call. Callers only set
    /// a body on POST requests; GET requests go out bodyless.
    pub fn json<T: Serialize>(mut self, value: &T) -> PayTabsResult<Self> {
        let body = serde_json::to_string(value).map_err(PayTabsError::from)?;
        self.body = Some(body);
        Ok(self)
    }

    /// The HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The target URL, without query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ordered query parameters.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    /// Caller-supplied headers (lower-cased keys, ordered value lists).
    pub fn headers(&self) -> &SigningHeaders {
        &self.headers
    }

    /// Whether a header with the given name is present (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_lowercase())
    }

    /// The serialized JSON body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
    }

    #[test]
    fn test_get_request() {
        let request = ApiRequest::get("https://secure.paytabs.sa/payment/token/");
        assert_eq!(request.method(), HttpMethod::Get);
        assert_eq!(request.url(), "https://secure.paytabs.sa/payment/token/");
        assert!(request.body().is_none());
    }

    #[test]
    fn test_query_preserves_order_and_duplicates() {
        let request = ApiRequest::get("https://x.example/")
            .query("b", "2")
            .query("a", "1")
            .query("a", "3");
        assert_eq!(
            request.query_params(),
            &[
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string()),
                ("a".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_lowercases_and_appends() {
        let request = ApiRequest::post("https://x.example/")
            .header("X-Custom", "one")
            .header("x-custom", "two");
        assert_eq!(request.headers()["x-custom"], vec!["one", "two"]);
        assert!(request.has_header("X-CUSTOM"));
    }

    #[test]
    fn test_json_serializes_once() {
        #[derive(Serialize)]
        struct Payload {
            profile_id: u64,
        }

        let request = ApiRequest::post("https://x.example/")
            .json(&Payload { profile_id: 1234 })
            .unwrap();
        assert_eq!(request.body(), Some("{\"profile_id\":1234}"));
    }
}
