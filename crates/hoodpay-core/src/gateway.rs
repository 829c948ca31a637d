//! # Payment Gateway Trait
//!
//! Seam between the HTTP layer and the provider client.
//! `hoodpay-client` implements it against the real API; tests substitute
//! their own implementations.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │           PaymentGateway (trait)             │
//! │  ├── fetch_transactions()                    │
//! │  ├── create_payment()                        │
//! │  └── provider_name()                         │
//! └──────────────────────────────────────────────┘
//!                       ▲
//!               ┌───────┴───────┐
//!               │ HoodPayClient │
//!               └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::payment::{PaymentReply, PaymentRequest};
use crate::settings::Credentials;
use crate::transaction::Transaction;
use async_trait::async_trait;
use std::sync::Arc;

/// Provider operations. Credentials are passed on every call, never held.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// List the business's payments.
    ///
    /// Fails with a configuration error before any I/O when either
    /// credential is empty.
    async fn fetch_transactions(&self, credentials: &Credentials) -> PaymentResult<Vec<Transaction>>;

    /// Create a payment and return the provider's reply as-is.
    async fn create_payment(
        &self,
        credentials: &Credentials,
        request: &PaymentRequest,
    ) -> PaymentResult<PaymentReply>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
