//! Region resolution and endpoint URL building.
//!
//! PayTabs operates per-market domains. This module maps a configured
//! region code onto the payment-API and merchant-portal hosts and composes
//! the full request URLs from fixed path segments. Everything here is pure
//! string composition: unknown or absent inputs degrade to defaults, never
//! to an error.

use std::fmt;

/// Host serving the payment API for unrecognized region codes.
const GLOBAL_API_DOMAIN: &str = "secure-global.paytabs.com";

/// Host serving the merchant portal for unrecognized region codes.
const GLOBAL_MERCHANT_DOMAIN: &str = "merchant-global.paytabs.com";

/// A PayTabs market region.
///
/// Parsed from the region code in client configuration. Codes that do not
/// match a known market fall back to [`Region::Global`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Saudi Arabia.
    Sau,
    /// United Arab Emirates.
    Are,
    /// Egypt.
    Egy,
    /// Oman.
    Omn,
    /// Jordan.
    Jor,
    /// Iraq.
    Irq,
    /// Global (also the fallback for unknown codes).
    Global,
}

impl Region {
    /// Resolve a region code, falling back to `Global` on any miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use paytabs::endpoints::Region;
    ///
    /// assert_eq!(Region::from_code("SAU"), Region::Sau);
    /// assert_eq!(Region::from_code("sau"), Region::Sau);
    /// assert_eq!(Region::from_code("XYZ"), Region::Global);
    /// assert_eq!(Region::from_code(""), Region::Global);
    /// ```
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_uppercase().as_str() {
            "SAU" => Region::Sau,
            "ARE" => Region::Are,
            "EGY" => Region::Egy,
            "OMN" => Region::Omn,
            "JOR" => Region::Jor,
            "IRQ" => Region::Irq,
            "GLOBAL" => Region::Global,
            _ => Region::Global,
        }
    }

    /// The region's short code, carried in the `pt-region` header.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Sau => "SAU",
            Region::Are => "ARE",
            Region::Egy => "EGY",
            Region::Omn => "OMN",
            Region::Jor => "JOR",
            Region::Irq => "IRQ",
            Region::Global => "GLOBAL",
        }
    }

    /// Payment-API host for this region.
    pub fn api_domain(&self) -> &'static str {
        match self {
            Region::Sau => "secure.paytabs.sa",
            Region::Are => "secure.paytabs.com",
            Region::Egy => "secure-egypt.paytabs.com",
            Region::Omn => "secure-oman.paytabs.com",
            Region::Jor => "secure-jordan.paytabs.com",
            Region::Irq => "secure-iraq.paytabs.com",
            Region::Global => GLOBAL_API_DOMAIN,
        }
    }

    /// Merchant-portal host for this region.
    pub fn merchant_domain(&self) -> &'static str {
        match self {
            Region::Sau => "merchant.paytabs.sa",
            Region::Are => "merchant.paytabs.com",
            Region::Egy => "merchant-egypt.paytabs.com",
            Region::Omn => "merchant-oman.paytabs.com",
            Region::Jor => "merchant-jordan.paytabs.com",
            Region::Irq => "merchant-iraq.paytabs.com",
            Region::Global => GLOBAL_MERCHANT_DOMAIN,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Builds fully-qualified PayTabs endpoint URLs for a configured region.
///
/// # Examples
///
/// ```
/// use paytabs::endpoints::{Region, UrlBuilder};
///
/// let urls = UrlBuilder::new(Region::Sau);
/// assert_eq!(urls.api_base(), "https://secure.paytabs.sa/payment/");
/// assert_eq!(
///     urls.build_full_api_path("token", "query", "", ""),
///     "https://secure.paytabs.sa/payment/token/query/"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UrlBuilder {
    region: Region,
}

impl UrlBuilder {
    /// Create a builder for the given region.
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    /// The region this builder resolves against.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Payment-API base URL: `https://{region-domain}/payment/`.
    pub fn api_base(&self) -> String {
        format!("https://{}/payment/", self.region.api_domain())
    }

    /// Merchant-portal base URL: `https://{merchant-domain}/`.
    pub fn merchant_base(&self) -> String {
        format!("https://{}/", self.region.merchant_domain())
    }

    /// Build a full payment-API URL.
    ///
    /// Concatenates each non-empty segment onto the API base in the fixed
    /// order service, resource, resource identifier, method — each trailed
    /// by `/`. Empty segments are skipped entirely, leaving no empty path
    /// components behind.
    pub fn build_full_api_path(
        &self,
        service: &str,
        resource: &str,
        resource_identifier: &str,
        method: &str,
    ) -> String {
        let mut url = self.api_base();
        for segment in [service, resource, resource_identifier, method] {
            if !segment.is_empty() {
                url.push_str(segment);
                url.push('/');
            }
        }
        url
    }

    /// Build a full merchant-portal URL.
    ///
    /// The second-level segment is selected by exact match on `service`:
    /// `"invoice"` and `"page"` map to themselves, anything else maps to
    /// `request/`. `resource` and `resource_identifier` are appended when
    /// non-empty, each trailed by `/`.
    pub fn build_full_merchant_url(
        &self,
        service: &str,
        resource: &str,
        resource_identifier: &str,
    ) -> String {
        let mut url = self.merchant_base();
        url.push_str(match service {
            "invoice" => "invoice/",
            "page" => "page/",
            _ => "request/",
        });
        for segment in [resource, resource_identifier] {
            if !segment.is_empty() {
                url.push_str(segment);
                url.push('/');
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_code_known() {
        assert_eq!(Region::from_code("SAU"), Region::Sau);
        assert_eq!(Region::from_code("ARE"), Region::Are);
        assert_eq!(Region::from_code("EGY"), Region::Egy);
        assert_eq!(Region::from_code("OMN"), Region::Omn);
        assert_eq!(Region::from_code("JOR"), Region::Jor);
        assert_eq!(Region::from_code("IRQ"), Region::Irq);
        assert_eq!(Region::from_code("GLOBAL"), Region::Global);
    }

    #[test]
    fn test_region_from_code_case_insensitive() {
        assert_eq!(Region::from_code("sau"), Region::Sau);
        assert_eq!(Region::from_code("Jor"), Region::Jor);
    }

    #[test]
    fn test_region_from_code_unknown_falls_back() {
        assert_eq!(Region::from_code("XYZ"), Region::Global);
        assert_eq!(Region::from_code(""), Region::Global);
        assert_eq!(Region::from_code("US"), Region::Global);
    }

    #[test]
    fn test_api_domain_table() {
        assert_eq!(Region::Sau.api_domain(), "secure.paytabs.sa");
        assert_eq!(Region::Are.api_domain(), "secure.paytabs.com");
        assert_eq!(Region::Egy.api_domain(), "secure-egypt.paytabs.com");
        assert_eq!(Region::Omn.api_domain(), "secure-oman.paytabs.com");
        assert_eq!(Region::Jor.api_domain(), "secure-jordan.paytabs.com");
        assert_eq!(Region::Irq.api_domain(), "secure-iraq.paytabs.com");
        assert_eq!(Region::Global.api_domain(), "secure-global.paytabs.com");
    }

    #[test]
    fn test_merchant_domain_fallback() {
        assert_eq!(
            Region::from_code("??").merchant_domain(),
            "merchant-global.paytabs.com"
        );
    }

    #[test]
    fn test_api_base() {
        let urls = UrlBuilder::new(Region::Egy);
        assert_eq!(urls.api_base(), "https://secure-egypt.paytabs.com/payment/");
    }

    #[test]
    fn test_build_full_api_path_all_segments() {
        let urls = UrlBuilder::new(Region::Sau);
        assert_eq!(
            urls.build_full_api_path("token", "query", "TOK-123", "verify"),
            "https://secure.paytabs.sa/payment/token/query/TOK-123/verify/"
        );
    }

    #[test]
    fn test_build_full_api_path_skips_empty_segments() {
        let urls = UrlBuilder::new(Region::Sau);
        assert_eq!(
            urls.build_full_api_path("token", "", "TOK-123", ""),
            "https://secure.paytabs.sa/payment/token/TOK-123/"
        );
    }

    #[test]
    fn test_build_full_api_path_all_empty_is_base() {
        let urls = UrlBuilder::new(Region::Are);
        assert_eq!(
            urls.build_full_api_path("", "", "", ""),
            "https://secure.paytabs.com/payment/"
        );
    }

    #[test]
    fn test_build_full_merchant_url_invoice() {
        let urls = UrlBuilder::new(Region::Are);
        assert_eq!(
            urls.build_full_merchant_url("invoice", "INV-9", ""),
            "https://merchant.paytabs.com/invoice/INV-9/"
        );
    }

    #[test]
    fn test_build_full_merchant_url_page() {
        let urls = UrlBuilder::new(Region::Global);
        assert_eq!(
            urls.build_full_merchant_url("page", "", ""),
            "https://merchant-global.paytabs.com/page/"
        );
    }

    #[test]
    fn test_build_full_merchant_url_default_segment() {
        let urls = UrlBuilder::new(Region::Sau);
        assert_eq!(
            urls.build_full_merchant_url("anything-else", "res", "id"),
            "https://merchant.paytabs.sa/request/res/id/"
        );
    }

    #[test]
    fn test_region_display() {
        assert_eq!(Region::Omn.to_string(), "OMN");
    }
}
