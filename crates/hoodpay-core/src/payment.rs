//! # Payment Creation Types
//!
//! Outbound payment request and the provider's reply.

use crate::error::PAYMENT_FAILED_MESSAGE;
use serde::{Deserialize, Serialize};

/// Path the provider redirects to after checkout
pub const PAYMENT_SUCCESS_PATH: &str = "/payment-success";

/// Payload POSTed to `/v1/businesses/{id}/payments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub name: String,
    pub description: String,
    pub currency: String,
    pub amount: u64,
    pub redirect_url: String,
}

impl PaymentRequest {
    /// The fixed order payment, redirecting back to `base_url`.
    pub fn fixed_order(base_url: &str) -> Self {
        Self {
            name: "Payment for Order".to_string(),
            description: "Order description".to_string(),
            currency: "USD".to_string(),
            amount: 100,
            redirect_url: format!("{}{}", base_url.trim_end_matches('/'), PAYMENT_SUCCESS_PATH),
        }
    }
}

/// Provider reply to a payment creation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// What the visitor sees after a payment attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Send the browser to the hosted checkout page
    Redirect(String),
    /// Stay on the page and show this text
    Rejected(String),
}

impl PaymentReply {
    /// An empty `paymentUrl` counts as absent.
    pub fn outcome(&self) -> PaymentOutcome {
        match self.payment_url.as_deref() {
            Some(url) if !url.is_empty() => PaymentOutcome::Redirect(url.to_string()),
            _ => PaymentOutcome::Rejected(
                self.message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| PAYMENT_FAILED_MESSAGE.to_string()),
            ),
        }
    }
}
