//! # hoodpay-client
//!
//! HoodPay REST client for the HoodPay gateway.
//!
//! Pure HTTP: no HTML, no browser. Credentials are sourced by the caller
//! (normally once per request from the settings store) and passed in.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hoodpay_client::HoodPayClient;
//! use hoodpay_core::{Credentials, PaymentGateway, PaymentRequest};
//!
//! let client = HoodPayClient::from_env()?;
//! let credentials = Credentials::new("api-key", "business-id");
//!
//! // List payments
//! for tx in client.fetch_transactions(&credentials).await? {
//!     println!("{} {} {}", tx.id, tx.amount, tx.created_at_display());
//! }
//!
//! // Create a payment and redirect the visitor to reply.payment_url
//! let reply = client
//!     .create_payment(&credentials, &PaymentRequest::fixed_order("https://shop.example"))
//!     .await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::HoodPayClient;
pub use config::{key_fingerprint, HoodPayConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
