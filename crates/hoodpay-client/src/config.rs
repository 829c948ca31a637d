//! # HoodPay Configuration
//!
//! Connection settings for the HoodPay API. Credentials are not part of this
//! config; they live in the settings store and are passed per call.

use hoodpay_core::PaymentError;
use sha2::{Digest, Sha256};
use std::env;

/// Production API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.hoodpay.io";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HoodPay API configuration
#[derive(Debug, Clone)]
pub struct HoodPayConfig {
    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HoodPayConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `HOODPAY_API_BASE_URL`
    /// - `HOODPAY_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url =
            env::var("HOODPAY_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match env::var("HOODPAY_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                PaymentError::Configuration(format!(
                    "HOODPAY_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(PaymentError::Configuration(
                "HOODPAY_API_BASE_URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(Self {
            api_base_url,
            timeout_secs,
        })
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for HoodPayConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Short SHA-256 prefix identifying an API key in logs without revealing it
pub fn key_fingerprint(api_key: &str) -> String {
    if api_key.is_empty() {
        return "none".to_string();
    }
    let digest = Sha256::digest(api_key.as_bytes());
    hex::encode(&digest[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HoodPayConfig::default();
        assert_eq!(config.api_base_url, "https://api.hoodpay.io");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_builders() {
        let config = HoodPayConfig::default()
            .with_api_base_url("http://127.0.0.1:9999")
            .with_timeout_secs(5);
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_key_fingerprint() {
        let fp = key_fingerprint("k1");
        assert_eq!(fp.len(), 8);
        assert_eq!(fp, key_fingerprint("k1"));
        assert_ne!(fp, key_fingerprint("k2"));
        assert!(!fp.contains("k1"));
        assert_eq!(key_fingerprint(""), "none");
    }
}
