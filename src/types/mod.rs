//! Typed request and response payloads for the PayTabs operations.
//!
//! These mirror the gateway's JSON contracts. Optional fields are plain
//! `Option` and skipped when absent, so request bodies stay minimal and
//! response parsing tolerates fields the gateway omits.

use serde::{Deserialize, Serialize};

/// Request body for issuing an authorization token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationTokenRequest {
    /// Merchant profile identifier.
    pub profile_id: u64,
    /// Transaction reference to authorize against, when scoped to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tran_ref: Option<String>,
}

/// Request body for issuing an authorization token bound to an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceAuthorizationTokenRequest {
    /// Merchant profile identifier.
    pub profile_id: u64,
    /// Invoice identifier the token is scoped to.
    pub invoice_id: u64,
}

/// Request body for querying a token's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenQueryRequest {
    /// Merchant profile identifier.
    pub profile_id: u64,
    /// The token under query.
    pub token: String,
}

/// Request body for revoking a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeTokenRequest {
    /// Merchant profile identifier.
    pub profile_id: u64,
    /// The token to revoke.
    pub token: String,
}

/// One shipment entry in a delivery tracking submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingDetail {
    /// Carrier name, e.g. `"aramex"`.
    pub carrier: String,
    /// Carrier-issued tracking number.
    pub tracking_number: String,
    /// Current shipment status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Estimated delivery date, carrier format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,
}

/// Request body for submitting delivery tracking information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryTrackingRequest {
    /// Merchant profile identifier.
    pub profile_id: u64,
    /// Transaction the shipment belongs to.
    pub tran_ref: String,
    /// Shipment entries.
    pub shipping_details: Vec<ShippingDetail>,
}

/// Common fields of PayTabs response payloads.
///
/// Works with [`crate::http::ApiResponse::payload`] for the operations in
/// this crate; callers with richer contracts can deserialize their own
/// types instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayTabsPayload {
    /// Issued or queried token.
    pub token: Option<String>,
    /// Transaction reference.
    pub tran_ref: Option<String>,
    /// Gateway response code.
    pub response_code: Option<String>,
    /// Gateway response message.
    pub response_message: Option<String>,
    /// Redirect URL for hosted flows.
    pub redirect_url: Option<String>,
    /// Shipment entries, when the payload carries them.
    pub shipping_details: Option<Vec<ShippingDetail>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_omits_absent_tran_ref() {
        let request = AuthorizationTokenRequest {
            profile_id: 1234,
            tran_ref: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"profile_id":1234}"#);
    }

    #[test]
    fn test_shipping_detail_round_trip() {
        let detail = ShippingDetail {
            carrier: "dhl".to_string(),
            tracking_number: "T-1".to_string(),
            status: Some("in_transit".to_string()),
            estimated_delivery: None,
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("estimated_delivery"));

        let parsed: ShippingDetail = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.tracking_number, "T-1");
    }

    #[test]
    fn test_payload_tolerates_missing_fields() {
        let payload: PayTabsPayload = serde_json::from_str(r#"{"token":"TOK-1"}"#).unwrap();
        assert_eq!(payload.token.as_deref(), Some("TOK-1"));
        assert!(payload.tran_ref.is_none());
        assert!(payload.shipping_details.is_none());
    }
}
