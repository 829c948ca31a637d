//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the provider gateway, the settings store, and configuration.

use crate::auth;
use hoodpay_client::HoodPayClient;
use hoodpay_core::{
    load_credentials, BoxedPaymentGateway, Credentials, FileSettingsStore, PaymentRequest,
    PaymentResult, SharedSettingsStore,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Page served at `/pay` unless `CHECKOUT_PAGE` overrides it
pub const DEFAULT_CHECKOUT_PAGE: &str = "<p>Complete your order below.</p>\n[hoodpay_payment]";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used for the provider redirect and the button endpoint
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Token granting the admin capability; admin pages are closed without it
    pub admin_token: Option<String>,
    /// Where settings are persisted
    pub settings_path: PathBuf,
    /// Content of the `/pay` page, shortcodes allowed
    pub checkout_page: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            admin_token: std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
            settings_path: std::env::var("SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("config/settings.toml")),
            checkout_page: std::env::var("CHECKOUT_PAGE")
                .unwrap_or_else(|_| DEFAULT_CHECKOUT_PAGE.to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Absolute URL of a path on this server
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            environment: "development".to_string(),
            admin_token: None,
            settings_path: PathBuf::from("config/settings.toml"),
            checkout_page: DEFAULT_CHECKOUT_PAGE.to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Provider client
    pub gateway: BoxedPaymentGateway,
    /// Credential storage
    pub settings: SharedSettingsStore,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create AppState from the environment with the HoodPay client and a
    /// file-backed settings store
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let settings = FileSettingsStore::open(&config.settings_path)
            .map_err(|e| anyhow::anyhow!("Failed to open settings store: {}", e))?;
        tracing::info!("Settings store: {}", settings.path().display());

        let client = HoodPayClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize HoodPay client: {}", e))?;

        Ok(Self::with_parts(config, Arc::new(client), Arc::new(settings)))
    }

    /// Assemble state from explicit parts
    pub fn with_parts(
        config: AppConfig,
        gateway: BoxedPaymentGateway,
        settings: SharedSettingsStore,
    ) -> Self {
        Self {
            gateway,
            settings,
            config,
        }
    }

    /// Credentials for the current request
    pub fn credentials(&self) -> PaymentResult<Credentials> {
        load_credentials(self.settings.as_ref())
    }

    /// The fixed payment every button click creates
    pub fn payment_request(&self) -> PaymentRequest {
        PaymentRequest::fixed_order(&self.config.base_url)
    }

    /// Nonce embedded in the settings form, if an admin token is configured
    pub fn settings_nonce(&self) -> Option<String> {
        self.config
            .admin_token
            .as_deref()
            .map(auth::settings_nonce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..AppConfig::default()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_bad_socket_addr_is_error() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_url_for() {
        let config = AppConfig {
            base_url: "https://shop.example/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.url_for("/api/v1/payments"),
            "https://shop.example/api/v1/payments"
        );
    }
}
