//! # hoodpay-core
//!
//! Core types and traits for the HoodPay gateway.
//!
//! This crate provides:
//! - `Credentials` and the `SettingsStore` contract for the two stored options
//! - `Transaction`, `PaymentRequest` and `PaymentReply` wire types
//! - `PaymentGateway` trait implemented by the provider client
//! - `PaymentButton` click state with its in-flight guard
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use hoodpay_core::{load_credentials, PaymentGateway, PaymentRequest};
//!
//! // Source credentials once for this request
//! let credentials = load_credentials(store.as_ref())?;
//!
//! // List payments
//! let transactions = gateway.fetch_transactions(&credentials).await?;
//!
//! // Start a payment and send the visitor to the hosted page
//! let reply = gateway
//!     .create_payment(&credentials, &PaymentRequest::fixed_order("https://shop.example"))
//!     .await?;
//! ```

pub mod button;
pub mod error;
pub mod gateway;
pub mod payment;
pub mod sanitize;
pub mod settings;
pub mod transaction;

// Re-exports for convenience
pub use button::{ButtonAction, InFlightGuard, PaymentButton};
pub use error::{
    PaymentError, PaymentResult, FETCH_FAILED_MESSAGE, GENERIC_FAILURE_MESSAGE,
    NOT_CONFIGURED_MESSAGE, PAYMENT_FAILED_MESSAGE,
};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use payment::{PaymentOutcome, PaymentReply, PaymentRequest, PAYMENT_SUCCESS_PATH};
pub use sanitize::{escape_html, sanitize_text_field};
pub use settings::{
    load_credentials, save_credentials, Credentials, FileSettingsStore, MemorySettingsStore,
    SettingsStore, SharedSettingsStore, API_KEY_OPTION, BUSINESS_ID_OPTION,
};
pub use transaction::{parse_timestamp, Transaction, DATE_DISPLAY_FORMAT};
