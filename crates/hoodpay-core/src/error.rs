//! # Payment Error Types
//!
//! Typed error handling for the HoodPay gateway.
//! All provider and settings operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Shown when either credential is missing.
pub const NOT_CONFIGURED_MESSAGE: &str = "API Key or Business ID is not configured.";

/// Shown in the admin view when the provider could not be reached.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch transactions. Please try again later.";

/// Shown to visitors when a payment request could not be sent.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// Shown to visitors when the provider returned neither a URL nor a message.
pub const PAYMENT_FAILED_MESSAGE: &str = "Failed to create payment.";

/// Core error type for all gateway operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// API key or business ID missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider reported an error in its response body
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Settings could not be read or persisted
    #[error("Storage error: {0}")]
    Storage(String),

    /// Caller lacks the administrative capability
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A payment request from this button is already running
    #[error("A payment request is already in progress")]
    PaymentInProgress,

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Missing-credentials error with the standard message
    pub fn not_configured() -> Self {
        PaymentError::Configuration(NOT_CONFIGURED_MESSAGE.to_string())
    }

    /// Provider error attributed to HoodPay
    pub fn provider(message: impl Into<String>) -> Self {
        PaymentError::ProviderError {
            provider: "hoodpay".to_string(),
            message: message.into(),
        }
    }

    /// Returns true if this error is transient.
    ///
    /// Informational only: nothing in the gateway retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::NetworkError(_))
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::ProviderError { .. } => 502,
            PaymentError::NetworkError(_) => 503,
            PaymentError::Serialization(_) => 502,
            PaymentError::Storage(_) => 500,
            PaymentError::Unauthorized(_) => 403,
            PaymentError::PaymentInProgress => 409,
            PaymentError::Internal(_) => 500,
        }
    }

    /// Text shown to a person looking at the admin screen.
    ///
    /// Provider messages pass through verbatim; callers escape at render time.
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::Configuration(msg) => msg.clone(),
            PaymentError::ProviderError { message, .. } => message.clone(),
            PaymentError::NetworkError(_) => FETCH_FAILED_MESSAGE.to_string(),
            PaymentError::Serialization(_) => "Unexpected response from HoodPay.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for gateway operations
pub type PaymentResult<T> = Result<T, PaymentError>;
